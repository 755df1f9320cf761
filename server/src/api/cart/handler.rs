//! Cart API Handlers
//!
//! All cart routes identify the cart through the `x-session-id` header and
//! echo the session id in the response body, so a first request without the
//! header learns its generated id.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::cart::{CartService, CartView, SessionId, ShippingMethod};
use crate::core::ServerState;
use crate::utils::AppResult;

/// One cart mutation, discriminated by `action`
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    Add {
        product_id: String,
        quantity: i64,
        #[serde(default)]
        notes: Option<String>,
        #[serde(default)]
        allergens_avoided: Vec<String>,
    },
    Update {
        index: usize,
        quantity: i64,
    },
    Remove {
        index: usize,
    },
    ApplyPromo {
        code: String,
    },
    UpdateShipping {
        method: ShippingMethod,
    },
    AddWish {
        product_id: String,
    },
    RemoveWish {
        product_id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub cart: CartView,
}

fn service(state: &ServerState) -> CartService {
    CartService::new(
        state.db.clone(),
        state.sessions.clone(),
        state.config.delivery_fee,
    )
}

/// GET /api/cart - current cart with totals
pub async fn view(
    State(state): State<ServerState>,
    SessionId(session_id): SessionId,
) -> Json<CartResponse> {
    let cart = service(&state).view(&session_id).await;
    Json(CartResponse { session_id, cart })
}

/// POST /api/cart - apply one cart action
pub async fn mutate(
    State(state): State<ServerState>,
    SessionId(session_id): SessionId,
    Json(action): Json<CartAction>,
) -> AppResult<Json<CartResponse>> {
    let service = service(&state);
    let cart = match action {
        CartAction::Add {
            product_id,
            quantity,
            notes,
            allergens_avoided,
        } => {
            service
                .add_item(&session_id, &product_id, quantity, notes, allergens_avoided)
                .await?
        }
        CartAction::Update { index, quantity } => {
            service.update_quantity(&session_id, index, quantity).await?
        }
        CartAction::Remove { index } => service.remove_item(&session_id, index).await?,
        CartAction::ApplyPromo { code } => service.apply_promo(&session_id, &code).await?,
        CartAction::UpdateShipping { method } => {
            service.update_shipping(&session_id, method).await?
        }
        CartAction::AddWish { product_id } => service.add_wish(&session_id, &product_id).await?,
        CartAction::RemoveWish { product_id } => {
            service.remove_wish(&session_id, &product_id).await?
        }
    };

    Ok(Json(CartResponse { session_id, cart }))
}

/// POST /api/cart/clear - abandon the cart, returning reserved stock
pub async fn clear(
    State(state): State<ServerState>,
    SessionId(session_id): SessionId,
) -> AppResult<Json<CartResponse>> {
    let service = service(&state);

    // Release every reservation before dropping the session
    let view = service.view(&session_id).await;
    for (index, _) in view.lines.iter().enumerate().rev() {
        service.remove_item(&session_id, index).await?;
    }
    service.clear_after_checkout(&session_id);

    let cart = service.view(&session_id).await;
    Ok(Json(CartResponse { session_id, cart }))
}
