//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Command Type
//! - CREATE:   bincode vehicle
//! - GET:      plate_len (4 bytes) + plate (UTF-8)
//! - LIST:     empty
//! - UPDATE:   plate_len (4 bytes) + plate + bincode vehicle
//! - DELETE:   plate_len (4 bytes) + plate
//! - TRAVERSE: order (1 byte)
//! - PING:     empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{Read, Write};

use crate::error::{RegistryError, Result};
use crate::index::Traversal;
use crate::model::Vehicle;

use super::{Command, Response, Status};

/// Header size: 1 byte command/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: cmd_type (1) + payload_len (4) + payload
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    let cmd_type = command.command_type() as u8;

    // Build payload based on command type
    let payload = match command {
        Command::Create { vehicle } => encode_vehicle(vehicle)?,
        Command::Get { plate } | Command::Delete { plate } => encode_plate(plate),
        Command::List | Command::Ping => Vec::new(),
        Command::Update { plate, vehicle } => {
            let mut payload = encode_plate(plate);
            payload.extend_from_slice(&encode_vehicle(vehicle)?);
            payload
        }
        Command::Traverse { order } => vec![traversal_byte(*order)],
    };

    // Build full message: header + payload
    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(cmd_type);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(&payload);

    Ok(message)
}

/// Decode a command from bytes
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    if bytes.len() < HEADER_SIZE {
        return Err(RegistryError::Protocol(format!(
            "incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    // Parse header
    let cmd_type = bytes[0];
    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(RegistryError::Protocol(format!(
            "payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(RegistryError::Protocol(format!(
            "incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    let payload = &bytes[HEADER_SIZE..total_len];

    // Parse command based on type
    match cmd_type {
        0x01 => decode_create_command(payload),
        0x02 => {
            let (plate, _) = decode_plate(payload, "GET")?;
            Ok(Command::Get { plate })
        }
        0x03 => decode_empty_command(payload, "LIST", Command::List),
        0x04 => decode_update_command(payload),
        0x05 => {
            let (plate, _) = decode_plate(payload, "DELETE")?;
            Ok(Command::Delete { plate })
        }
        0x06 => decode_traverse_command(payload),
        0x07 => decode_empty_command(payload, "PING", Command::Ping),
        _ => Err(RegistryError::Protocol(format!(
            "unknown command type: 0x{:02x}",
            cmd_type
        ))),
    }
}

/// Decode CREATE command payload
fn decode_create_command(payload: &[u8]) -> Result<Command> {
    let vehicle = decode_vehicle(payload)?;
    Ok(Command::Create { vehicle })
}

/// Decode UPDATE command payload
fn decode_update_command(payload: &[u8]) -> Result<Command> {
    let (plate, consumed) = decode_plate(payload, "UPDATE")?;
    let vehicle = decode_vehicle(&payload[consumed..])?;
    Ok(Command::Update { plate, vehicle })
}

/// Decode TRAVERSE command payload
fn decode_traverse_command(payload: &[u8]) -> Result<Command> {
    if payload.len() != 1 {
        return Err(RegistryError::Protocol(format!(
            "TRAVERSE command: expected 1 byte order, got {}",
            payload.len()
        )));
    }

    let order = match payload[0] {
        0x00 => Traversal::Inorder,
        0x01 => Traversal::Preorder,
        0x02 => Traversal::Postorder,
        b => {
            return Err(RegistryError::Protocol(format!(
                "unknown traversal order: 0x{:02x}",
                b
            )))
        }
    };

    Ok(Command::Traverse { order })
}

/// Decode a command that carries no payload
fn decode_empty_command(payload: &[u8], name: &str, command: Command) -> Result<Command> {
    if !payload.is_empty() {
        return Err(RegistryError::Protocol(format!(
            "{} command: unexpected payload of {} bytes",
            name,
            payload.len()
        )));
    }
    Ok(command)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let payload = response.payload.as_deref().unwrap_or(&[]);
    let payload_len = payload.len() as u32;

    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(response.status as u8);
    message.extend_from_slice(&payload_len.to_be_bytes());
    message.extend_from_slice(payload);

    message
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    if bytes.len() < HEADER_SIZE {
        return Err(RegistryError::Protocol(format!(
            "incomplete response header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    // Parse header
    let status_byte = bytes[0];
    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(RegistryError::Protocol(format!(
            "response payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(RegistryError::Protocol(format!(
            "incomplete response payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    // Parse status
    let status = match status_byte {
        0x00 => Status::Ok,
        0x01 => Status::NotFound,
        0x02 => Status::Conflict,
        0x03 => Status::BadRequest,
        0x04 => Status::Error,
        _ => {
            return Err(RegistryError::Protocol(format!(
                "unknown response status: 0x{:02x}",
                status_byte
            )))
        }
    };

    // Extract payload
    let payload = if payload_len > 0 {
        Some(bytes[HEADER_SIZE..total_len].to_vec())
    } else {
        None
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a complete command is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    let message = read_frame(reader)?;
    decode_command(&message)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let message = read_frame(reader)?;
    decode_response(&message)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one complete header + payload frame from a stream
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    // Read header first
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    // Parse payload length
    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(RegistryError::Protocol(format!(
            "payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    // Read payload
    let mut message = Vec::with_capacity(HEADER_SIZE + payload_len);
    message.extend_from_slice(&header);
    if payload_len > 0 {
        let mut payload = vec![0u8; payload_len];
        reader.read_exact(&mut payload)?;
        message.extend_from_slice(&payload);
    }

    Ok(message)
}

// =============================================================================
// Field helpers
// =============================================================================

/// Encode a plate as length-prefixed UTF-8
fn encode_plate(plate: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + plate.len());
    out.extend_from_slice(&(plate.len() as u32).to_be_bytes());
    out.extend_from_slice(plate.as_bytes());
    out
}

/// Decode a length-prefixed plate; returns the plate and bytes consumed
fn decode_plate(payload: &[u8], command: &str) -> Result<(String, usize)> {
    if payload.len() < 4 {
        return Err(RegistryError::Protocol(format!(
            "{} command: missing plate length",
            command
        )));
    }

    let plate_len = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;

    if payload.len() < 4 + plate_len {
        return Err(RegistryError::Protocol(format!(
            "{} command: incomplete plate (expected {}, got {})",
            command,
            plate_len,
            payload.len() - 4
        )));
    }

    let plate = String::from_utf8(payload[4..4 + plate_len].to_vec())
        .map_err(|_| RegistryError::Protocol(format!("{} command: plate is not UTF-8", command)))?;

    Ok((plate, 4 + plate_len))
}

/// Serialize a vehicle with bincode
fn encode_vehicle(vehicle: &Vehicle) -> Result<Vec<u8>> {
    bincode::serialize(vehicle).map_err(|e| RegistryError::Serialization(e.to_string()))
}

/// Deserialize a vehicle with bincode
fn decode_vehicle(bytes: &[u8]) -> Result<Vehicle> {
    bincode::deserialize(bytes).map_err(|e| RegistryError::Serialization(e.to_string()))
}

/// Wire byte for a traversal order
fn traversal_byte(order: Traversal) -> u8 {
    match order {
        Traversal::Inorder => 0x00,
        Traversal::Preorder => 0x01,
        Traversal::Postorder => 0x02,
    }
}
