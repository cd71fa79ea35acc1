//! Error types for platereg
//!
//! Provides a unified error type for all operations.
//!
//! Duplicate plates, absent plates, and plate mismatches are ordinary
//! recoverable signals mapped to protocol statuses by the request layer.
//! Only genuinely unexpected conditions (unreadable store, broken socket)
//! are hard failures.

use thiserror::Error;

/// Result type alias using RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Unified error type for platereg operations
#[derive(Debug, Error)]
pub enum RegistryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("vehicle with plate '{0}' already exists")]
    DuplicatePlate(String),

    #[error("vehicle with plate '{0}' not found")]
    PlateNotFound(String),

    #[error("cannot change vehicle plate: request addresses '{path}' but payload carries '{body}'")]
    PlateMismatch { path: String, body: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}
