//! Order and order item models

use serde::{Deserialize, Serialize};

/// A placed order in the `orders` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    /// Prefixed id, e.g. `ORD-9f2c...`
    pub order_id: String,
    pub customer_name: String,
    /// `online` or `in_store`
    pub order_type: String,
    /// `pending`, `completed`
    pub status: String,
    /// `pickup` or `delivery` (online orders only)
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub promo_code: Option<String>,
    /// Set for in-store orders placed at the till
    #[serde(default)]
    pub cashier_id: Option<String>,
    /// Epoch millis
    pub created_at: i64,
}

/// A line of a placed order in the `order_item` table
///
/// `price` is a snapshot of the unit price at placement time, so later menu
/// changes never alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRow {
    /// Prefixed id, e.g. `OI-9f2c...`
    pub item_id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    /// Free-text customisations, e.g. "oat milk; Allergens to avoid: nuts, soy"
    #[serde(default)]
    pub customisations: Option<String>,
}
