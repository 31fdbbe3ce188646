//! Customer Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// A customer the operator issues service orders for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<i64>,
}

impl Customer {
    pub fn new(name: String, phone: Option<String>) -> Self {
        Self {
            id: None,
            name,
            phone,
            email: None,
            created_at: Some(crate::util::now_millis()),
        }
    }
}

/// Customer for creation (without id)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
