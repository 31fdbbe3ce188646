//! Material Catalog API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{Material, MaterialCreate, MaterialUpdate};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::MaterialRepository;
use crate::utils::AppResult;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Material>>> {
    let repo = MaterialRepository::new(state.db.clone());
    let materials = repo.find_all().await?;
    Ok(Json(materials))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MaterialCreate>,
) -> AppResult<Json<Material>> {
    payload.validate()?;
    let repo = MaterialRepository::new(state.db.clone());
    let material = repo.create(payload).await?;
    Ok(Json(material))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MaterialUpdate>,
) -> AppResult<Json<Material>> {
    let repo = MaterialRepository::new(state.db.clone());
    let material = repo.update(&id, payload).await?;
    Ok(Json(material))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = MaterialRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
