//! Cart API module

mod handler;

pub use handler::CartResponse;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart", get(handler::view).post(handler::mutate))
        .route("/api/cart/clear", post(handler::clear))
}
