//! Payment model

use serde::{Deserialize, Serialize};

/// A payment record in the `payment` table, one per order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Prefixed id, e.g. `PAY-9f2c...`
    pub payment_id: String,
    pub order_id: String,
    /// `cash` or `card`
    pub method: String,
    /// `pending` (cash, settled on handover), `paid` (card, online),
    /// `completed` (in-store, taken at the till)
    pub status: String,
    pub amount: f64,
    /// Epoch millis
    pub created_at: i64,
}
