//! Connection Handler
//!
//! Runs the request loop for one client.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::protocol::{read_command, write_response, Command, Response};
use crate::registry::Registry;

/// Handles a single client connection
pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,

    /// Shared registry, the target of every dispatched command
    registry: Arc<Registry>,

    /// Peer address for logging
    peer: String,
}

impl Connection {
    /// Wrap an accepted stream, applying the configured timeouts.
    ///
    /// Nagle's algorithm is disabled; a timeout of zero leaves the stream
    /// blocking indefinitely.
    pub fn new(stream: TcpStream, registry: Arc<Registry>, config: &Config) -> Result<Self> {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let write_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(stream),
            writer: BufWriter::new(write_stream),
            registry,
            peer,
        })
    }

    /// Serve the client until it disconnects or a hard error occurs.
    ///
    /// Each turn reads one framed command, dispatches it against the
    /// registry, and writes the status back. A vanished or idle client is
    /// not an error; a frame we cannot parse is answered with an error
    /// status and ends the session.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("client connected: {}", self.peer);

        loop {
            let command = match read_command(&mut self.reader) {
                Ok(command) => command,
                Err(e) if client_gone(&e) => {
                    tracing::debug!("client {} disconnected: {}", self.peer, e);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("unreadable request from {}: {}", self.peer, e);
                    let _ = write_response(&mut self.writer, &Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("{} -> {:?}", self.peer, command);

            let response = self.dispatch(command);
            match write_response(&mut self.writer, &response) {
                Ok(()) => {}
                Err(e) if client_gone(&e) => {
                    tracing::debug!("client {} disconnected before response: {}", self.peer, e);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("error writing to {}: {}", self.peer, e);
                    return Err(e);
                }
            }
        }
    }

    /// Map registry outcomes onto wire statuses
    fn dispatch(&self, command: Command) -> Response {
        match self.registry.execute(command) {
            Ok(payload) => Response::ok(payload),
            Err(e @ RegistryError::PlateNotFound(_)) => Response::not_found(&e.to_string()),
            Err(e @ RegistryError::DuplicatePlate(_)) => Response::conflict(&e.to_string()),
            Err(e @ RegistryError::PlateMismatch { .. }) => Response::bad_request(&e.to_string()),
            Err(e) => Response::error(&e.to_string()),
        }
    }
}

/// Whether an error means the peer is gone or idle past its timeout,
/// rather than the server misbehaving
fn client_gone(err: &RegistryError) -> bool {
    use std::io::ErrorKind;

    match err {
        RegistryError::Io(e) => matches!(
            e.kind(),
            ErrorKind::UnexpectedEof
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe
                | ErrorKind::WouldBlock
                | ErrorKind::TimedOut
        ),
        _ => false,
    }
}
