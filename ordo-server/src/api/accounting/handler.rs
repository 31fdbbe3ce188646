//! Accounting API Handlers

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{AccountingRepository, MonthlySummary};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    /// "YYYY-MM"
    pub month: String,
}

/// Revenue, material costs, profit and the per-service breakdown for one
/// calendar month
pub async fn monthly(
    State(state): State<ServerState>,
    Query(params): Query<MonthlyParams>,
) -> AppResult<Json<MonthlySummary>> {
    let repo = AccountingRepository::new(state.db.clone());
    let summary = repo.monthly_summary(&params.month).await?;
    Ok(Json(summary))
}
