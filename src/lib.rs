//! # platereg
//!
//! A vehicle registry service built around an ordered plate index:
//! - Binary search tree keyed on license plate (unique, string-ordered)
//! - Flat-file CSV persistence kept consistent after each mutation
//! - TCP-based client protocol with conflict/not-found/bad-request signals
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Registry                                 │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ PlateIndex  │          │VehicleStore │
//!   │   (BST)     │          │  (CSV file) │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod index;
pub mod store;
pub mod registry;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RegistryError, Result};
pub use config::Config;
pub use model::Vehicle;
pub use registry::Registry;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of platereg
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
