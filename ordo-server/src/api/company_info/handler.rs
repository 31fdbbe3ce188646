//! Company Info API Handlers

use axum::Json;
use axum::extract::State;
use shared::models::{CompanyInfo, CompanyInfoUpdate};

use crate::core::ServerState;
use crate::db::repository::CompanyInfoRepository;
use crate::utils::AppResult;

/// Get current company info, creating the empty singleton on first access
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<CompanyInfo>> {
    let repo = CompanyInfoRepository::new(state.db.clone());
    let info = repo.get_or_create().await?;
    Ok(Json(info))
}

/// Merge an update into the singleton
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<CompanyInfoUpdate>,
) -> AppResult<Json<CompanyInfo>> {
    let repo = CompanyInfoRepository::new(state.db.clone());
    let info = repo.update(payload).await?;
    Ok(Json(info))
}
