//! Service Order Model
//!
//! The aggregate root of the system: one work order / quote for a customer,
//! with its service lines and material usages stored as separate rows and
//! the computed totals persisted redundantly as snapshot columns at save
//! time. Snapshot columns are written once and never recomputed in place;
//! document rendering re-derives presentation figures from the line rows.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Order lifecycle status. User-settable; transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Free-form postal address. No validation beyond presence of the struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    pub complement: Option<String>,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

/// Stored order row. Line items live in `order_service_line` and
/// `order_material_line`; the four amount columns are the save-time
/// snapshot of the pricing aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOrder {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// "customer:key" reference
    pub customer_id: String,
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub address: Address,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub materials_amount: f64,
    #[serde(default)]
    pub services_amount: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    pub created_at: i64,
}

/// One billable service entry within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderServiceLine {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// "service_order:key" reference
    pub order_id: String,
    /// "service:key" reference
    pub service_id: String,
    pub price: f64,
    pub description: Option<String>,
}

/// A quantity of a catalog material attached to an order, priced at time of use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMaterialLine {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// "service_order:key" reference
    pub order_id: String,
    /// "material:key" reference
    pub material_id: String,
    pub quantity: i64,
    /// Snapshot of the material's default price at save time
    pub unit_price: f64,
}

// ---------------------------------------------------------------------------
// Create payloads (form state as submitted)
// ---------------------------------------------------------------------------

/// One service line as typed into the form. The price arrives as raw text
/// and may use either "," or "." as the decimal separator; parsing happens
/// in the pricing layer and malformed input degrades to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLineInput {
    pub service_id: String,
    #[serde(default)]
    pub price: String,
    pub description: Option<String>,
}

/// One selected material with its quantity. Quantities below 1 are clamped
/// to 1 on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLineInput {
    pub material_id: String,
    pub quantity: i64,
}

/// Full order-save payload. The customer is either referenced by id or
/// created inline from name/phone when no id is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceOrderCreate {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    #[validate(length(min = 1, message = "an order needs at least one service line"))]
    pub services: Vec<ServiceLineInput>,
    #[serde(default)]
    pub materials: Vec<MaterialLineInput>,
    #[serde(default)]
    pub address: Address,
    /// Absolute discount amount as raw text (locale-tolerant, same parsing
    /// as service prices). Not validated against the subtotal.
    pub discount: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}
