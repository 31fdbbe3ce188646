//! Company Info Model (letterhead)

use serde::{Deserialize, Serialize};

/// Company identity block printed on generated documents (singleton)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: String,
    /// Tax identification number (CNPJ)
    #[serde(default)]
    pub tax_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub updated_at: Option<i64>,
}

/// Update payload, merged into the singleton; absent fields are left
/// untouched
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}
