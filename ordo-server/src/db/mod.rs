//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). The handle is constructed once at
//! startup and passed into repositories explicitly; tests open throwaway
//! databases under temporary directories the same way.

pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "ordo";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (creating if missing) the database under `data_dir`
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = data_dir.as_ref().join("ordo.db");

        let db = Surreal::new::<RocksDb>(path.as_path())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path.display(), "Database opened (SurrealDB/RocksDB)");

        Ok(Self { db })
    }
}
