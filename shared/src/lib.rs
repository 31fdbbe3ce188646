//! Shared domain types for the Ordo workspace
//!
//! Holds the serde-serializable entities persisted by `ordo-server` plus
//! small id/time utilities. No I/O happens here; everything is plain data.

pub mod models;
pub mod util;

pub use models::{
    Address, CompanyInfo, CompanyInfoUpdate, Customer, CustomerCreate, Material, MaterialCreate,
    MaterialLineInput, MaterialUpdate, OrderMaterialLine, OrderServiceLine, OrderStatus, Service,
    ServiceCreate, ServiceLineInput, ServiceOrder, ServiceOrderCreate, ServiceUpdate,
};
pub use util::{now_millis, snowflake_id};
