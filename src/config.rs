//! Configuration for platereg
//!
//! Centralized configuration with sensible defaults.

use std::net::ToSocketAddrs;
use std::path::PathBuf;

use crate::error::{RegistryError, Result};

/// Main configuration for a platereg instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files.
    /// Internal structure:
    ///   {data_dir}/
    ///     └── vehicles.csv     (flat-file record store)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./platereg_data"),
            listen_addr: "127.0.0.1:7474".to_string(),
            max_connections: 1024,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for the record store)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Validate the settings and produce the final config.
    ///
    /// The listen address must resolve to a socket address and the
    /// connection limit must admit at least one client.
    pub fn build(self) -> Result<Config> {
        match self
            .config
            .listen_addr
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
        {
            Ok(true) => {}
            _ => {
                return Err(RegistryError::Config(format!(
                    "'{}' is not a valid listen address",
                    self.config.listen_addr
                )));
            }
        }

        if self.config.max_connections == 0 {
            return Err(RegistryError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        Ok(self.config)
    }
}
