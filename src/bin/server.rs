//! platereg Server Binary
//!
//! Starts the TCP server for the vehicle registry.

use std::sync::Arc;

use clap::Parser;
use platereg::network::Server;
use platereg::{Config, Registry};
use tracing_subscriber::{fmt, EnvFilter};

/// platereg Server
#[derive(Parser, Debug)]
#[command(name = "platereg-server")]
#[command(about = "Vehicle registry over an ordered plate index")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./platereg_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7474")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,platereg=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("platereg Server v{}", platereg::VERSION);
    tracing::info!("data directory: {}", args.data_dir);
    tracing::info!("listen address: {}", args.listen);

    // Build config from args
    let config = match Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Open registry (seeds the index from the store)
    let registry = match Registry::open(config.clone()) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!("failed to open registry: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("registry initialized with {} vehicles", registry.len());

    // Start server
    let mut server = Server::new(config, registry);
    if let Err(e) = server.run() {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("server stopped");
}
