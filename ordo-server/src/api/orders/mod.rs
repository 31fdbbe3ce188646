//! Service order routes

mod handler;

use axum::Router;
use axum::routing::{get, post, put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list).post(handler::create))
        .route(
            "/api/orders/{id}",
            get(handler::detail).delete(handler::delete),
        )
        .route("/api/orders/{id}/status", put(handler::update_status))
        .route("/api/orders/{id}/document", get(handler::document))
        .route("/api/orders/document/preview", post(handler::preview))
}
