//! Record Store Module
//!
//! Flat-file persistence for the full vehicle record set.
//!
//! ## Responsibilities
//! - Seed the index at startup via `load_all`
//! - Mirror each successful index mutation (append/remove/rewrite)
//! - Skip malformed persisted rows on load (logged, never propagated)
//!
//! ## File Format
//! One record per line, comma-separated, stable field order, header line:
//! ```text
//! plate,brand,color,model,price
//! ABC-123,Toyota,Red,Corolla,25000
//! ```
//! Fields containing a comma, quote, or newline are quoted with doubled
//! inner quotes. Remove and rewrite are load-everything/write-everything-back:
//! O(n) I/O per mutation, with no atomicity guarantee against a crash
//! mid-write.

mod file;

pub use file::VehicleStore;
