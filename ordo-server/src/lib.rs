//! Ordo Server - service-order management backend
//!
//! # Module structure
//!
//! ```text
//! ordo-server/src/
//! ├── core/       # configuration, server state, startup
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # embedded SurrealDB and repositories
//! ├── pricing/    # money helpers and the order-totals aggregator
//! ├── documents/  # order document model, HTML and PDF renderers
//! └── utils/      # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod documents;
pub mod pricing;
pub mod utils;

pub use crate::core::{Config, ServerState};
pub use crate::utils::logger::init_logger;
pub use crate::utils::{AppError, AppResult};
