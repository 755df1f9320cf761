//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Notification, OrderRow};
use crate::db::repository::{OrderRepository, PlacedOrder};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub start: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/orders?limit=&start= - order history, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<OrderRow>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(page.limit, page.start)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - one order with items and payment
pub async fn get_full(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PlacedOrder>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_full(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// GET /api/notifications/:recipient - notifications, newest first
pub async fn notifications(
    State(state): State<ServerState>,
    Path(recipient): Path<String>,
) -> AppResult<Json<Vec<Notification>>> {
    let repo = OrderRepository::new(state.db.clone());
    let notifications = repo
        .find_notifications(&recipient)
        .await
        .map_err(AppError::from)?;
    Ok(Json(notifications))
}

#[derive(Debug, Serialize)]
pub struct LoyaltyBalance {
    pub customer_name: String,
    pub points: i64,
}

/// GET /api/loyalty/:customer - accumulated loyalty points
pub async fn loyalty_balance(
    State(state): State<ServerState>,
    Path(customer): Path<String>,
) -> AppResult<Json<LoyaltyBalance>> {
    let repo = OrderRepository::new(state.db.clone());
    let points = repo
        .loyalty_balance(&customer)
        .await
        .map_err(AppError::from)?;
    Ok(Json(LoyaltyBalance {
        customer_name: customer,
        points,
    }))
}
