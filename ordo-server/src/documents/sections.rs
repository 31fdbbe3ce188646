//! Typed document sections
//!
//! A rendered work order is a fixed sequence of sections; renderers walk
//! the list and never reorder it.

use shared::models::Address;

use super::logo::LogoImage;

/// Company identity block at the top of the document
#[derive(Debug, Clone)]
pub struct Letterhead {
    pub company_name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub logo: Option<LogoImage>,
}

/// Order label ("NOVA" for drafts, the record key once saved) plus the
/// issue date injected at render time
#[derive(Debug, Clone)]
pub struct OrderHeader {
    pub label: String,
    pub issue_date: String,
}

#[derive(Debug, Clone)]
pub struct CustomerBlock {
    pub name: String,
    pub phone: String,
}

/// One billable service as printed
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEntry {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// One material row of the usage table
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEntry {
    pub name: String,
    pub unit: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Financial summary rows; `total` is printed emphasized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryTable {
    pub services_total: f64,
    pub materials_total: f64,
    pub discount: f64,
    pub total: f64,
}

/// Two-party signature block: company left, customer right
#[derive(Debug, Clone)]
pub struct SignatureBlock {
    pub company_name: String,
    pub company_tax_id: String,
    pub customer_name: String,
}

/// Document sections in print order
#[derive(Debug, Clone)]
pub enum Section {
    Letterhead(Letterhead),
    OrderHeader(OrderHeader),
    Customer(CustomerBlock),
    JobAddress(Address),
    Services(Vec<ServiceEntry>),
    Materials(Vec<MaterialEntry>),
    Summary(SummaryTable),
    Signatures(SignatureBlock),
}

/// Currency formatting used everywhere a money figure is printed:
/// "R$" prefix, exactly two decimals.
pub fn fmt_money(value: f64) -> String {
    format!("R$ {:.2}", value)
}
