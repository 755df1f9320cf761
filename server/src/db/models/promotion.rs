//! Promotion model

use serde::{Deserialize, Serialize};

/// A percentage-off promo code in the `promotion` table
///
/// Dates are inclusive ISO `YYYY-MM-DD` strings, which compare correctly
/// as plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub code: String,
    /// Percentage discount, e.g. 10.0 for 10% off
    pub percent_off: f64,
    pub starts_on: String,
    pub ends_on: String,
    pub active: bool,
}

/// Payload for creating a promotion
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionCreate {
    pub code: String,
    pub percent_off: f64,
    pub starts_on: String,
    pub ends_on: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
