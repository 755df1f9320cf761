//! Inventory model

use serde::{Deserialize, Serialize};

/// One stock row per product in the `inventory` table
///
/// `stock_level` is the single source of truth for sellable units. Cart
/// reservations and order placement both go through conditional updates
/// that refuse to take the level below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: String,
    pub stock_level: i64,
    /// Level at or below which the product shows up in the low-stock report
    pub reorder_threshold: i64,
}
