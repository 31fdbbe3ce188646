//! Server state
//!
//! Holds the shared handles every handler needs: configuration, the
//! embedded database and the outbound HTTP client used for logo inlining.
//! Constructed once at startup and cloned cheaply into requests; tests
//! build one against a temp-dir database the same way.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub http: reqwest::Client,
}

impl ServerState {
    /// Create directories, open the database and wire up shared clients
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create work dir: {e}")))?;

        let db_service = DbService::new(&data_dir).await?;

        Ok(Self {
            config: Arc::new(config),
            db: db_service.db,
            http: reqwest::Client::new(),
        })
    }
}
