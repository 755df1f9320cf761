//! Loyalty award model

use serde::{Deserialize, Serialize};

/// Loyalty points earned for an order, in the `loyalty_program` table
///
/// Awards are best-effort: a failed insert never fails the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyAward {
    /// Prefixed id, e.g. `LOY-9f2c...`
    pub award_id: String,
    pub customer_name: String,
    pub order_id: String,
    pub points: i64,
    /// Epoch millis
    pub created_at: i64,
}
