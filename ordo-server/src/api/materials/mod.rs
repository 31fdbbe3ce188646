//! Material catalog routes

mod handler;

use axum::Router;
use axum::routing::{get, put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/materials", get(handler::list).post(handler::create))
        .route(
            "/api/materials/{id}",
            put(handler::update).delete(handler::delete),
        )
}
