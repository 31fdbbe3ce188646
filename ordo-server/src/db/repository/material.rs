//! Material Catalog Repository

use shared::models::{Material, MaterialCreate, MaterialUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_ids, record_key};

const TABLE: &str = "material";

#[derive(Clone)]
pub struct MaterialRepository {
    base: BaseRepository,
}

impl MaterialRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All materials ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Material>> {
        let materials: Vec<Material> = self
            .base
            .db()
            .query("SELECT * FROM material ORDER BY name")
            .await?
            .take(0)?;
        Ok(materials)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Material>> {
        let key = record_key(TABLE, id);
        let material: Option<Material> = self.base.db().select((TABLE, key)).await?;
        Ok(material)
    }

    /// Fetch a batch of materials by "material:key" id strings
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Material>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let things = parse_record_ids(ids);
        let materials: Vec<Material> = self
            .base
            .db()
            .query("SELECT * FROM material WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(materials)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Material>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM material WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let materials: Vec<Material> = result.take(0)?;
        Ok(materials.into_iter().next())
    }

    pub async fn create(&self, data: MaterialCreate) -> RepoResult<Material> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Material '{}' already exists",
                data.name
            )));
        }

        let material = Material {
            id: None,
            name: data.name,
            unit: data.unit.unwrap_or_else(|| "un".to_string()),
            default_price: data.default_price.unwrap_or(0.0),
            is_custom: data.is_custom.unwrap_or(false),
        };

        let key = super::new_record_key();
        let created: Option<Material> = self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(material)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create material".to_string()))
    }

    pub async fn update(&self, id: &str, data: MaterialUpdate) -> RepoResult<Material> {
        let key = record_key(TABLE, id);
        let existing = self
            .find_by_id(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Material {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Material '{}' already exists",
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
            .ok_or_else(|| RepoError::NotFound(format!("Material {} not found", id)))
    }

    /// Hard delete a material. Order lines referencing it are removed
    /// first so no usage row dangles.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        if self.find_by_id(key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Material {} not found", id)));
        }

        let material_ref = format!("{TABLE}:{key}");
        self.base
            .db()
            .query("DELETE order_material_line WHERE material_id = $mid")
            .bind(("mid", material_ref))
            .await?;

        let _: Option<Material> = self.base.db().delete((TABLE, key)).await?;
        Ok(true)
    }
}
