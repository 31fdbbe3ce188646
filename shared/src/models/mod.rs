//! Domain models persisted by ordo-server
//!
//! Every entity follows the same triple: the stored row, a `*Create`
//! payload (no id) and, where the resource is editable, a `*Update`
//! payload with all-optional fields merged into the row.

pub mod company_info;
pub mod customer;
pub mod material;
pub mod serde_helpers;
pub mod service;
pub mod service_order;

pub use company_info::{CompanyInfo, CompanyInfoUpdate};
pub use customer::{Customer, CustomerCreate};
pub use material::{Material, MaterialCreate, MaterialUpdate};
pub use service::{Service, ServiceCreate, ServiceUpdate};
pub use service_order::{
    Address, MaterialLineInput, OrderMaterialLine, OrderServiceLine, OrderStatus, ServiceLineInput,
    ServiceOrder, ServiceOrderCreate,
};
