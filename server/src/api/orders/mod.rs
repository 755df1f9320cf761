//! Orders API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", get(handler::get_full))
        .route(
            "/api/notifications/{recipient}",
            get(handler::notifications),
        )
        .route("/api/loyalty/{customer}", get(handler::loyalty_balance))
}
