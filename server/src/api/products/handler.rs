//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::repository::{InventoryRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

/// A product together with its live stock level
#[derive(Debug, Serialize)]
pub struct ProductWithStock {
    #[serde(flatten)]
    pub product: Product,
    pub stock_level: i64,
}

/// GET /api/products - list the menu (available products with stock)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductWithStock>>> {
    let products = ProductRepository::new(state.db.clone());
    let inventory = InventoryRepository::new(state.db.clone());

    let mut out = Vec::new();
    for product in products
        .find_all_available()
        .await
        .map_err(AppError::from)?
    {
        let stock_level = inventory
            .stock_level(&product.product_id)
            .await
            .map_err(AppError::from)?
            .unwrap_or(0);
        out.push(ProductWithStock {
            product,
            stock_level,
        });
    }

    Ok(Json(out))
}

/// GET /api/products/:id - a single product with stock
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductWithStock>> {
    let products = ProductRepository::new(state.db.clone());
    let inventory = InventoryRepository::new(state.db.clone());

    let product = products
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::product_not_found(&id))?;
    let stock_level = inventory
        .stock_level(&product.product_id)
        .await
        .map_err(AppError::from)?
        .unwrap_or(0);

    Ok(Json(ProductWithStock {
        product,
        stock_level,
    }))
}
