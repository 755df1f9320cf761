//! Inventory API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::InventoryRecord;
use crate::db::repository::InventoryRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/inventory/low-stock - products at or below their reorder threshold
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let records = repo.find_below_threshold().await.map_err(AppError::from)?;
    Ok(Json(records))
}
