//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: CREATE   - Payload: bincode vehicle
//! - 0x02: GET      - Payload: plate_len (4) + plate
//! - 0x03: LIST     - Payload: empty
//! - 0x04: UPDATE   - Payload: plate_len (4) + plate + bincode vehicle
//! - 0x05: DELETE   - Payload: plate_len (4) + plate
//! - 0x06: TRAVERSE - Payload: order (1): 0 inorder, 1 preorder, 2 postorder
//! - 0x07: PING     - Payload: empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND     (absent plate)
//! - 0x02: CONFLICT      (duplicate plate)
//! - 0x03: BAD_REQUEST   (plate mismatch on update)
//! - 0x04: ERROR

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{decode_command, decode_response, encode_command, encode_response};
pub use codec::{read_command, read_response, write_command, write_response};
