//! Response definitions
//!
//! Represents responses to clients.

/// Response status codes
///
/// Mirrors the HTTP-equivalents the registry's error signals map to:
/// conflict for duplicate plates, not-found for absent plates, bad-request
/// for a plate mismatch on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    Conflict = 0x02,
    BadRequest = 0x03,
    Error = 0x04,
}

/// A response to send to a client
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (records for reads, error message for failures)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create a NOT_FOUND response with a message
    pub fn not_found(message: &str) -> Self {
        Self {
            status: Status::NotFound,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Create a CONFLICT response with a message
    pub fn conflict(message: &str) -> Self {
        Self {
            status: Status::Conflict,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Create a BAD_REQUEST response with a message
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: Status::BadRequest,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }
}
