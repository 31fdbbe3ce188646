//! Company info (letterhead) routes

mod handler;

use axum::Router;
use axum::routing::get;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/company-info",
        get(handler::get).put(handler::update),
    )
}
