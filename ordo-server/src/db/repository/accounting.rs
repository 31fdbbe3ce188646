//! Accounting Repository
//!
//! Monthly rollup over persisted orders: revenue comes from the snapshot
//! total columns, costs from the material usage rows, and the breakdown
//! groups service-line revenue by service name. Aggregation happens
//! app-side with exact decimal arithmetic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{OrderMaterialLine, OrderServiceLine, ServiceOrder};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::pricing::{material_line_total, to_decimal, to_f64};

use super::{BaseRepository, RepoError, RepoResult, parse_record_ids};

/// Revenue attributed to one service type within the month
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRevenue {
    pub service_name: String,
    pub amount: f64,
}

/// One month of figures for the accounting screen
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    /// "YYYY-MM"
    pub month: String,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub profit: f64,
    pub order_count: usize,
    /// Per-service revenue, largest first
    pub breakdown: Vec<ServiceRevenue>,
}

/// Validate a month string ("YYYY-MM") and return its first day
fn validate_month(month: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| RepoError::Validation(format!("Invalid month format: {}", month)))
}

#[derive(Clone)]
pub struct AccountingRepository {
    base: BaseRepository,
}

impl AccountingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Aggregate revenue, material costs, profit and the per-service
    /// breakdown for one calendar month (UTC window).
    pub async fn monthly_summary(&self, month: &str) -> RepoResult<MonthlySummary> {
        let first_day = validate_month(month)?;
        let next_month = first_day
            .checked_add_months(chrono::Months::new(1))
            .ok_or_else(|| RepoError::Validation(format!("Month out of range: {}", month)))?;

        let start = first_day
            .and_hms_opt(0, 0, 0)
            .expect("midnight always exists")
            .and_utc()
            .timestamp_millis();
        let end = next_month
            .and_hms_opt(0, 0, 0)
            .expect("midnight always exists")
            .and_utc()
            .timestamp_millis();

        let orders: Vec<ServiceOrder> = self
            .base
            .db()
            .query("SELECT * FROM service_order WHERE created_at >= $start AND created_at < $end")
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;

        let order_count = orders.len();
        let total_revenue: Decimal = orders.iter().map(|o| to_decimal(o.total_amount)).sum();

        let order_refs: Vec<String> = orders
            .iter()
            .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
            .collect();

        let (total_costs, breakdown) = if order_refs.is_empty() {
            (Decimal::ZERO, Vec::new())
        } else {
            let material_lines: Vec<OrderMaterialLine> = self
                .base
                .db()
                .query("SELECT * FROM order_material_line WHERE order_id IN $ids")
                .bind(("ids", order_refs.clone()))
                .await?
                .take(0)?;
            let costs: Decimal = material_lines
                .iter()
                .map(|l| material_line_total(l.unit_price, l.quantity))
                .sum();

            let service_lines: Vec<OrderServiceLine> = self
                .base
                .db()
                .query("SELECT * FROM order_service_line WHERE order_id IN $ids")
                .bind(("ids", order_refs))
                .await?
                .take(0)?;
            let breakdown = self.revenue_by_service(&service_lines).await?;

            (costs, breakdown)
        };

        Ok(MonthlySummary {
            month: month.to_string(),
            total_revenue: to_f64(total_revenue),
            total_costs: to_f64(total_costs),
            profit: to_f64(total_revenue - total_costs),
            order_count,
            breakdown,
        })
    }

    /// Group line revenue by service name, sorted largest first (name as
    /// tie-breaker so the ordering is deterministic)
    async fn revenue_by_service(
        &self,
        lines: &[OrderServiceLine],
    ) -> RepoResult<Vec<ServiceRevenue>> {
        use std::collections::HashMap;

        let ids: Vec<String> = lines.iter().map(|l| l.service_id.clone()).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let things = parse_record_ids(&ids);
        let services: Vec<shared::models::Service> = self
            .base
            .db()
            .query("SELECT * FROM service WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        let names: HashMap<String, String> = services
            .into_iter()
            .filter_map(|s| s.id.as_ref().map(|id| (id.to_string(), s.name.clone())))
            .collect();

        let mut by_name: HashMap<String, Decimal> = HashMap::new();
        for line in lines {
            // Lines whose service was deleted from the catalog have no name
            // to group under; skip them like the source screen did
            let Some(name) = names.get(&line.service_id) else {
                continue;
            };
            *by_name.entry(name.clone()).or_insert(Decimal::ZERO) += to_decimal(line.price);
        }

        let mut breakdown: Vec<ServiceRevenue> = by_name
            .into_iter()
            .map(|(service_name, amount)| ServiceRevenue {
                service_name,
                amount: to_f64(amount),
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.service_name.cmp(&b.service_name))
        });
        Ok(breakdown)
    }
}
