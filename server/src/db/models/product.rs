//! Product model

use serde::{Deserialize, Serialize};

/// A menu product as stored in the `product` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Prefixed id, e.g. `PRD-9f2c...`
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, rounded to 2 decimal places
    pub price: f64,
    /// Allergens the product contains (lowercase names)
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the product is offered for sale at all
    pub available: bool,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
}

/// Payload for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Initial stock level for the product's inventory record
    pub stock_level: i64,
    /// Low-stock alert threshold
    #[serde(default = "default_threshold")]
    pub reorder_threshold: i64,
}

fn default_threshold() -> i64 {
    5
}
