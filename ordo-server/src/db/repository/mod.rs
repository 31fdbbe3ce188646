//! Repository Module
//!
//! CRUD access to the embedded SurrealDB tables. Each repository takes the
//! database handle in its constructor — there is no process-wide
//! connection; tests inject a handle backed by a temp-dir database.

pub mod accounting;
pub mod company_info;
pub mod customer;
pub mod material;
pub mod service;
pub mod service_order;

pub use accounting::{AccountingRepository, MonthlySummary, ServiceRevenue};
pub use company_info::CompanyInfoRepository;
pub use customer::CustomerRepository;
pub use material::MaterialRepository;
pub use service::ServiceRepository;
pub use service_order::{
    JoinedMaterialLine, JoinedServiceLine, NewMaterialLine, NewServiceLine, OrderSummary,
    ServiceOrderDetail, ServiceOrderRepository,
};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
#[allow(async_fn_in_trait)]
pub trait Repository<T, CreateDto, UpdateDto> {
    async fn find_all(&self) -> RepoResult<Vec<T>>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn create(&self, data: CreateDto) -> RepoResult<T>;
    async fn update(&self, id: &str, data: UpdateDto) -> RepoResult<T>;
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// Ids travel as "table:key" strings end to end. The helpers below go from
// that form to the bare key / RecordId the SurrealDB API calls want.

/// Letter-prefixed snowflake key. Keys must stay plain SurrealQL
/// identifiers (a bare numeric key would render escaped as ⟨...⟩ and break
/// the string form everywhere), hence the leading letter.
pub(crate) fn new_record_key() -> String {
    format!("r{}", shared::util::snowflake_id())
}

/// Strip a leading "table:" prefix, if present, from an id string
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    }
}

/// Parse "table:key" strings into RecordIds for bind parameters,
/// silently skipping malformed entries
pub(crate) fn parse_record_ids(ids: &[String]) -> Vec<surrealdb::RecordId> {
    ids.iter().filter_map(|s| s.parse().ok()).collect()
}
