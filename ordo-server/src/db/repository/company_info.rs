//! Company Info Repository (Singleton)
//!
//! The letterhead record. Fetched fresh for every document render so a
//! logo or tax-id change shows up on the next generated file.

use shared::models::{CompanyInfo, CompanyInfoUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "company_info";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct CompanyInfoRepository {
    base: BaseRepository,
}

impl CompanyInfoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton company info
    pub async fn get_or_create(&self) -> RepoResult<CompanyInfo> {
        if let Some(info) = self.get().await? {
            return Ok(info);
        }

        let created: Option<CompanyInfo> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(CompanyInfo::default())
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create company info".to_string()))
    }

    /// Get the singleton company info
    pub async fn get(&self) -> RepoResult<Option<CompanyInfo>> {
        let info: Option<CompanyInfo> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(info)
    }

    /// Merge an update into the singleton
    pub async fn update(&self, data: CompanyInfoUpdate) -> RepoResult<CompanyInfo> {
        // Ensure singleton exists
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let updated: Option<CompanyInfo> =
            self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update company info".to_string()))
    }
}
