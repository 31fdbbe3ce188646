//! Order document model
//!
//! Normalizes the two shapes an order can arrive in — live form state that
//! was never saved, and a persisted order re-fetched with its relations —
//! into one structure the renderers consume. For persisted orders the
//! presentation totals are re-derived from the fetched line items rather
//! than read from the snapshot columns; for an unmodified order the two
//! agree.

use chrono::NaiveDate;
use shared::models::{Address, CompanyInfo, Material};

use crate::db::repository::ServiceOrderDetail;
use crate::pricing::{OrderTotals, material_line_total, parse_amount, to_f64};

use super::logo::LogoImage;
use super::sections::{
    CustomerBlock, Letterhead, MaterialEntry, OrderHeader, Section, ServiceEntry, SignatureBlock,
    SummaryTable,
};

/// Label printed for orders that have no persistent identifier yet
pub const DRAFT_LABEL: &str = "NOVA";

/// One service line of an unsaved order, catalog name already resolved
#[derive(Debug, Clone)]
pub struct DraftServiceLine {
    pub service_name: Option<String>,
    /// Raw text as typed; parsed with the usual locale-tolerant rules
    pub price_raw: String,
    pub description: Option<String>,
}

/// One selected material of an unsaved order with its catalog row
#[derive(Debug, Clone)]
pub struct DraftMaterialLine {
    pub material: Material,
    pub quantity: i64,
}

/// Unsaved form state, catalog rows joined in by the caller
#[derive(Debug, Clone)]
pub struct DraftOrder {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub address: Address,
    pub services: Vec<DraftServiceLine>,
    pub materials: Vec<DraftMaterialLine>,
    /// Raw discount text, same parsing as service prices
    pub discount_raw: Option<String>,
}

/// The two data shapes feeding one normalizer
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Draft(DraftOrder),
    Persisted(ServiceOrderDetail),
}

/// Self-contained record everything the renderers need
#[derive(Debug, Clone)]
pub struct OrderDocument {
    pub label: String,
    /// dd/mm/yyyy, fixed at assembly time so repeated renders match
    pub issue_date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: Address,
    pub services: Vec<ServiceEntry>,
    pub materials: Vec<MaterialEntry>,
    pub totals: OrderTotals,
    pub letterhead: Letterhead,
}

impl OrderDocument {
    /// Normalize either source shape into the uniform document
    pub fn assemble(
        source: DocumentSource,
        company: CompanyInfo,
        logo: Option<LogoImage>,
        issue_date: NaiveDate,
    ) -> Self {
        let letterhead = Letterhead {
            company_name: company.name,
            tax_id: company.tax_id,
            phone: company.phone.unwrap_or_default(),
            email: company.email.unwrap_or_default(),
            logo,
        };
        let issue_date = issue_date.format("%d/%m/%Y").to_string();

        match source {
            DocumentSource::Draft(draft) => Self::from_draft(draft, letterhead, issue_date),
            DocumentSource::Persisted(detail) => {
                Self::from_persisted(detail, letterhead, issue_date)
            }
        }
    }

    fn from_draft(draft: DraftOrder, letterhead: Letterhead, issue_date: String) -> Self {
        let services: Vec<ServiceEntry> = draft
            .services
            .iter()
            .map(|line| ServiceEntry {
                name: line.service_name.clone().unwrap_or_else(|| "-".to_string()),
                price: parse_amount(&line.price_raw),
                description: line.description.clone(),
            })
            .collect();

        let materials: Vec<MaterialEntry> = draft
            .materials
            .iter()
            .map(|line| {
                let quantity = line.quantity.max(1);
                let unit_price = line.material.default_price;
                MaterialEntry {
                    name: line.material.name.clone(),
                    unit: line.material.unit.clone(),
                    quantity,
                    unit_price,
                    line_total: to_f64(material_line_total(unit_price, quantity)),
                }
            })
            .collect();

        let discount = draft
            .discount_raw
            .as_deref()
            .map(parse_amount)
            .unwrap_or(0.0);
        let totals = OrderTotals::compute(
            materials.iter().map(|m| (m.unit_price, m.quantity)),
            services.iter().map(|s| s.price),
            discount,
        );

        Self {
            label: DRAFT_LABEL.to_string(),
            issue_date,
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone.unwrap_or_default(),
            address: draft.address,
            services,
            materials,
            totals,
            letterhead,
        }
    }

    fn from_persisted(
        detail: ServiceOrderDetail,
        letterhead: Letterhead,
        issue_date: String,
    ) -> Self {
        let label = detail.label();

        let services: Vec<ServiceEntry> = detail
            .services
            .iter()
            .map(|joined| ServiceEntry {
                name: joined
                    .service_name
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                price: joined.line.price,
                description: joined.line.description.clone(),
            })
            .collect();

        let materials: Vec<MaterialEntry> = detail
            .materials
            .iter()
            .map(|joined| {
                let quantity = joined.line.quantity;
                let unit_price = joined.line.unit_price;
                let (name, unit) = joined
                    .material
                    .as_ref()
                    .map(|m| (m.name.clone(), m.unit.clone()))
                    .unwrap_or_else(|| ("-".to_string(), String::new()));
                MaterialEntry {
                    name,
                    unit,
                    quantity,
                    unit_price,
                    line_total: to_f64(material_line_total(unit_price, quantity)),
                }
            })
            .collect();

        // Presentation figures are recomputed from the fetched lines; the
        // discount has no line rows so it comes from the stored column
        let totals = OrderTotals::compute(
            materials.iter().map(|m| (m.unit_price, m.quantity)),
            services.iter().map(|s| s.price),
            detail.order.discount_amount,
        );

        let customer_name = detail
            .customer
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".to_string());
        let customer_phone = detail
            .customer
            .as_ref()
            .and_then(|c| c.phone.clone())
            .or_else(|| detail.order.customer_phone.clone())
            .unwrap_or_default();

        Self {
            label,
            issue_date,
            customer_name,
            customer_phone,
            address: detail.order.address.clone(),
            services,
            materials,
            totals,
            letterhead,
        }
    }

    /// The fixed section sequence consumed by the renderers
    pub fn sections(&self) -> Vec<Section> {
        vec![
            Section::Letterhead(self.letterhead.clone()),
            Section::OrderHeader(OrderHeader {
                label: self.label.clone(),
                issue_date: self.issue_date.clone(),
            }),
            Section::Customer(CustomerBlock {
                name: self.customer_name.clone(),
                phone: self.customer_phone.clone(),
            }),
            Section::JobAddress(self.address.clone()),
            Section::Services(self.services.clone()),
            Section::Materials(self.materials.clone()),
            Section::Summary(SummaryTable {
                services_total: self.totals.services_total,
                materials_total: self.totals.materials_total,
                discount: self.totals.discount,
                total: self.totals.total,
            }),
            Section::Signatures(SignatureBlock {
                company_name: self.letterhead.company_name.clone(),
                company_tax_id: self.letterhead.tax_id.clone(),
                customer_name: self.customer_name.clone(),
            }),
        ]
    }

    /// Deterministic download filename derived from the order label
    pub fn suggested_filename(&self) -> String {
        let safe: String = self
            .label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("ordem_servico_{}.pdf", safe)
    }
}
