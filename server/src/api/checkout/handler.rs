//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::cart::{CartService, SessionId};
use crate::checkout::{OrderReceipt, PaymentDetails, PlacementService};
use crate::core::ServerState;
use crate::utils::AppResult;

use crate::api::cart::CartResponse;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    /// Required when the cart's shipping method is delivery
    #[serde(default)]
    pub address: Option<String>,
    pub payment: PaymentDetails,
}

/// GET /api/checkout - pre-checkout summary (cart lines and totals)
pub async fn summary(
    State(state): State<ServerState>,
    SessionId(session_id): SessionId,
) -> Json<CartResponse> {
    let cart = CartService::new(
        state.db.clone(),
        state.sessions.clone(),
        state.config.delivery_fee,
    )
    .view(&session_id)
    .await;
    Json(CartResponse { session_id, cart })
}

/// POST /api/checkout - place the order held in the cart session
pub async fn place(
    State(state): State<ServerState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<OrderReceipt>> {
    let service = PlacementService::new(
        state.db.clone(),
        state.sessions.clone(),
        state.config.delivery_fee,
        state.config.loyalty_earn_divisor,
    );

    let receipt = service
        .place_online(
            &session_id,
            &payload.customer_name,
            payload.address,
            payload.payment,
        )
        .await?;

    Ok(Json(receipt))
}
