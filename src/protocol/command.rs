//! Command definitions
//!
//! Represents commands from clients.

use crate::index::Traversal;
use crate::model::Vehicle;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Create = 0x01,
    Get = 0x02,
    List = 0x03,
    Update = 0x04,
    Delete = 0x05,
    Traverse = 0x06,
    Ping = 0x07,
}

/// A parsed command
#[derive(Debug, Clone)]
pub enum Command {
    /// Register a new vehicle
    Create { vehicle: Vehicle },

    /// Get a vehicle by plate
    Get { plate: String },

    /// List all vehicles in ascending plate order
    List,

    /// Replace the payload of the vehicle under `plate`
    Update { plate: String, vehicle: Vehicle },

    /// Remove a vehicle by plate
    Delete { plate: String },

    /// List all vehicles in the given traversal order
    Traverse { order: Traversal },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Create { .. } => CommandType::Create,
            Command::Get { .. } => CommandType::Get,
            Command::List => CommandType::List,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::Traverse { .. } => CommandType::Traverse,
            Command::Ping => CommandType::Ping,
        }
    }
}
