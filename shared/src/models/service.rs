//! Service Catalog Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// A billable service type with its default price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub default_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceCreate {
    #[validate(length(min = 1, message = "service name is required"))]
    pub name: String,
    pub default_price: Option<f64>,
}

/// Service for update (all optional; absent fields are left untouched
/// when merged into the row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
}
