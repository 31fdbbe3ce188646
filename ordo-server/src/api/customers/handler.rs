//! Customer API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{Customer, CustomerCreate};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::CustomerRepository;
use crate::utils::{AppError, AppResult};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customers = repo.find_all().await?;
    Ok(Json(customers))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    Ok(Json(customer))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    payload.validate()?;
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.create(payload).await?;
    Ok(Json(customer))
}
