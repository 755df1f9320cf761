//! Notification model

use serde::{Deserialize, Serialize};

/// A customer-facing notification in the `notification` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Prefixed id, e.g. `NOTIF-9f2c...`
    pub notification_id: String,
    pub recipient: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    /// Epoch millis
    pub created_at: i64,
}
