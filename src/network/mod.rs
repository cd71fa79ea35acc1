//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One handler thread per connection, capped by `max_connections`
//! - Commands routed through the Registry

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;
