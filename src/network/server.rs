//! TCP Server
//!
//! Accepts connections and dispatches to handler threads.

use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::registry::Registry;

use super::Connection;

/// TCP server for platereg
pub struct Server {
    /// Server configuration
    config: Config,

    /// Shared registry, handed to each connection
    registry: Arc<Registry>,

    /// Set to request a graceful stop of the accept loop
    shutdown: Arc<AtomicBool>,

    /// Number of currently active connections
    active: Arc<AtomicUsize>,
}

impl Server {
    /// Create a new server with the given config and registry
    pub fn new(config: Config, registry: Arc<Registry>) -> Self {
        Self {
            config,
            registry,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start the server (blocking)
    ///
    /// Accepts connections until shutdown is signalled. Each connection runs
    /// on its own thread; new connections beyond `max_connections` are
    /// dropped immediately.
    pub fn run(&mut self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)?;

        // Non-blocking accept so the loop can observe the shutdown flag
        listener.set_nonblocking(true)?;

        tracing::info!("listening on {}", self.config.listen_addr);

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::info!("shutdown requested, stopping accept loop");
                break;
            }

            let (stream, addr) = match listener.accept() {
                Ok(accepted) => accepted,
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(50));
                    continue;
                }
                Err(e) => {
                    tracing::warn!("accept failed: {}", e);
                    continue;
                }
            };

            if self.active.load(Ordering::Relaxed) >= self.config.max_connections {
                tracing::warn!("connection limit reached, rejecting {}", addr);
                drop(stream);
                continue;
            }

            // Handler threads use blocking I/O with timeouts
            if let Err(e) = stream.set_nonblocking(false) {
                tracing::warn!("failed to configure stream for {}: {}", addr, e);
                continue;
            }

            let registry = Arc::clone(&self.registry);
            let active = Arc::clone(&self.active);
            let config = self.config.clone();

            active.fetch_add(1, Ordering::Relaxed);
            thread::spawn(move || {
                let result =
                    Connection::new(stream, registry, &config).and_then(|mut conn| conn.handle());

                if let Err(e) = result {
                    tracing::warn!("connection from {} ended with error: {}", addr, e);
                }

                active.fetch_sub(1, Ordering::Relaxed);
            });
        }

        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Handle to the shutdown flag, for wiring into signal handlers
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Number of currently active connections
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}
