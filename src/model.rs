//! Vehicle record model
//!
//! The value type stored in the plate index and persisted by the store.

use serde::{Deserialize, Serialize};

/// A vehicle record.
///
/// The plate is the unique key: compared by plain string ordering, and
/// immutable once the record is in the index. All other fields are payload
/// and may be replaced via update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate (unique identifier)
    pub plate: String,

    /// Vehicle brand
    pub brand: String,

    /// Vehicle color
    pub color: String,

    /// Vehicle model
    pub model: String,

    /// Vehicle price
    pub price: f64,
}

impl Vehicle {
    /// Create a new vehicle record
    pub fn new(
        plate: impl Into<String>,
        brand: impl Into<String>,
        color: impl Into<String>,
        model: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            plate: plate.into(),
            brand: brand.into(),
            color: color.into(),
            model: model.into(),
            price,
        }
    }
}
