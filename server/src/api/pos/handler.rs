//! Point-of-sale API Handlers
//!
//! Till orders skip the cart entirely: no reservations, no shipping, no
//! promo codes. Payment is taken on the spot, so it lands as `completed`.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::checkout::{OrderReceipt, PlacementService, PosLine};
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct PosOrderRequest {
    pub cashier_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub items: Vec<PosLine>,
    /// false means cash
    #[serde(default)]
    pub pay_with_card: bool,
}

/// POST /api/pos/orders - place an in-store order
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<PosOrderRequest>,
) -> AppResult<Json<OrderReceipt>> {
    let service = PlacementService::new(
        state.db.clone(),
        state.sessions.clone(),
        state.config.delivery_fee,
        state.config.loyalty_earn_divisor,
    );

    let receipt = service
        .place_pos(
            &payload.cashier_id,
            payload.customer_name,
            payload.items,
            payload.pay_with_card,
        )
        .await?;

    Ok(Json(receipt))
}
