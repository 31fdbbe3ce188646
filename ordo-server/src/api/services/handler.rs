//! Service Catalog API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{Service, ServiceCreate, ServiceUpdate};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::ServiceRepository;
use crate::utils::AppResult;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Service>>> {
    let repo = ServiceRepository::new(state.db.clone());
    let services = repo.find_all().await?;
    Ok(Json(services))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<Service>> {
    payload.validate()?;
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.create(payload).await?;
    Ok(Json(service))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<Service>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.update(&id, payload).await?;
    Ok(Json(service))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
