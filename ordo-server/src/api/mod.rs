//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`customers`] - customer listing and creation
//! - [`materials`] - material catalog CRUD
//! - [`services`] - service catalog CRUD
//! - [`orders`] - order capture, listing, status, deletion and documents
//! - [`company_info`] - letterhead singleton
//! - [`accounting`] - monthly financial rollup

pub mod accounting;
pub mod company_info;
pub mod customers;
pub mod health;
pub mod materials;
pub mod orders;
pub mod services;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// All routes, no middleware or state attached yet
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(materials::router())
        .merge(services::router())
        .merge(orders::router())
        .merge(company_info::router())
        .merge(accounting::router())
}

/// Fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the SPA frontend runs on its own origin
        .layer(CorsLayer::permissive())
        // Gzip compress responses
        .layer(CompressionLayer::new())
        // Request tracing at INFO level
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
