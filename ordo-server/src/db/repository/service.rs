//! Service Catalog Repository

use shared::models::{Service, ServiceCreate, ServiceUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_ids, record_key};

const TABLE: &str = "service";

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All services ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Service>> {
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT * FROM service ORDER BY name")
            .await?
            .take(0)?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        let key = record_key(TABLE, id);
        let service: Option<Service> = self.base.db().select((TABLE, key)).await?;
        Ok(service)
    }

    /// Fetch a batch of services by "service:key" id strings
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let things = parse_record_ids(ids);
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT * FROM service WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(services)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM service WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let services: Vec<Service> = result.take(0)?;
        Ok(services.into_iter().next())
    }

    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Service '{}' already exists",
                data.name
            )));
        }

        let service = Service {
            id: None,
            name: data.name,
            default_price: data.default_price.unwrap_or(0.0),
        };

        let key = super::new_record_key();
        let created: Option<Service> = self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(service)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    pub async fn update(&self, id: &str, data: ServiceUpdate) -> RepoResult<Service> {
        let key = record_key(TABLE, id);
        let existing = self
            .find_by_id(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Service '{}' already exists",
                new_name
            )));
        }

        let rid = RecordId::from_table_key(TABLE, key);
        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", rid))
            .bind(("data", data))
            .await?;

        self.find_by_id(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }

    /// Hard delete a service, clearing order lines that reference it first
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        if self.find_by_id(key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Service {} not found", id)));
        }

        let service_ref = format!("{TABLE}:{key}");
        self.base
            .db()
            .query("DELETE order_service_line WHERE service_id = $sid")
            .bind(("sid", service_ref))
            .await?;

        let _: Option<Service> = self.base.db().delete((TABLE, key)).await?;
        Ok(true)
    }
}
