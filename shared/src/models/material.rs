//! Material Catalog Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// A catalog material, priced per unit at time of use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// Unit of sale shown next to quantities ("m", "kg", "un", ...)
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub default_price: f64,
    /// Entered ad hoc by the operator rather than part of the base catalog
    #[serde(default)]
    pub is_custom: bool,
}

fn default_unit() -> String {
    "un".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MaterialCreate {
    #[validate(length(min = 1, message = "material name is required"))]
    pub name: String,
    pub unit: Option<String>,
    pub default_price: Option<f64>,
    pub is_custom: Option<bool>,
}

/// Material for update (all optional; absent fields are left untouched
/// when merged into the row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,
}
