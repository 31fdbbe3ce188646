//! Service Order Repository
//!
//! The persistence gateway for orders and their line rows. Saving is a
//! strictly sequential multi-insert (order, then service lines, then
//! material lines) with no surrounding transaction: a failure aborts the
//! remaining steps and leaves earlier inserts in place, surfacing a
//! step-specific error. Reads re-join the normalized rows app-side into
//! typed DTOs, one per query shape.

use serde::Serialize;
use shared::models::{
    Customer, Material, OrderMaterialLine, OrderServiceLine, OrderStatus, ServiceOrder,
};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_ids, record_key};

const TABLE: &str = "service_order";
const SERVICE_LINE_TABLE: &str = "order_service_line";
const MATERIAL_LINE_TABLE: &str = "order_material_line";

/// One order as shown in the list screen: the stored row (snapshot totals
/// included) with its customer and first service name joined in.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub customer: Option<Customer>,
    pub first_service_name: Option<String>,
}

/// A service line with its catalog service name resolved
#[derive(Debug, Clone, Serialize)]
pub struct JoinedServiceLine {
    #[serde(flatten)]
    pub line: OrderServiceLine,
    pub service_name: Option<String>,
}

/// A material line with its catalog row resolved
#[derive(Debug, Clone, Serialize)]
pub struct JoinedMaterialLine {
    #[serde(flatten)]
    pub line: OrderMaterialLine,
    pub material: Option<Material>,
}

/// Full order detail: the re-fetched order with customer, service lines
/// and material usages joined in
#[derive(Debug, Clone, Serialize)]
pub struct ServiceOrderDetail {
    pub order: ServiceOrder,
    pub customer: Option<Customer>,
    pub services: Vec<JoinedServiceLine>,
    pub materials: Vec<JoinedMaterialLine>,
}

impl ServiceOrderDetail {
    /// Bare "key" portion of the order id, used as the document label
    pub fn label(&self) -> String {
        self.order
            .id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}

/// Line specs handed to [`ServiceOrderRepository::create`]; `order_id` is
/// filled in by the repository once the order row exists.
#[derive(Debug, Clone)]
pub struct NewServiceLine {
    pub service_id: String,
    pub price: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMaterialLine {
    pub material_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Clone)]
pub struct ServiceOrderRepository {
    base: BaseRepository,
}

impl ServiceOrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist an order and its lines. Steps run in sequence and are not
    /// rolled back on a later failure; each step carries its own error
    /// message so the caller can surface which one broke.
    pub async fn create(
        &self,
        order: ServiceOrder,
        services: Vec<NewServiceLine>,
        materials: Vec<NewMaterialLine>,
    ) -> RepoResult<ServiceOrder> {
        let key = super::new_record_key();

        let created: Option<ServiceOrder> = self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(order)
            .await
            .map_err(|e| RepoError::Database(format!("error creating order: {e}")))?;
        let created = created
            .ok_or_else(|| RepoError::Database("error creating order: no row returned".into()))?;

        let order_ref = format!("{TABLE}:{key}");

        for line in services {
            let row = OrderServiceLine {
                id: None,
                order_id: order_ref.clone(),
                service_id: line.service_id,
                price: line.price,
                description: line.description,
            };
            let _: Option<OrderServiceLine> = self
                .base
                .db()
                .create(SERVICE_LINE_TABLE)
                .content(row)
                .await
                .map_err(|e| RepoError::Database(format!("error saving services: {e}")))?;
        }

        for line in materials {
            let row = OrderMaterialLine {
                id: None,
                order_id: order_ref.clone(),
                material_id: line.material_id,
                // Quantities below 1 make no sense on a usage row
                quantity: line.quantity.max(1),
                unit_price: line.unit_price,
            };
            let _: Option<OrderMaterialLine> = self
                .base
                .db()
                .create(MATERIAL_LINE_TABLE)
                .content(row)
                .await
                .map_err(|e| RepoError::Database(format!("error saving materials: {e}")))?;
        }

        tracing::info!(order = %order_ref, "Service order created");
        Ok(created)
    }

    /// Order summaries newest-first, customer and first service name
    /// joined in. Displayed totals come from the stored snapshot columns.
    pub async fn find_all(&self) -> RepoResult<Vec<OrderSummary>> {
        let orders: Vec<ServiceOrder> = self
            .base
            .db()
            .query("SELECT * FROM service_order ORDER BY created_at DESC")
            .await?
            .take(0)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        // Batch-load customers for the page of orders
        let customer_ids: Vec<String> = orders.iter().map(|o| o.customer_id.clone()).collect();
        let customers: Vec<Customer> = {
            let things = parse_record_ids(&customer_ids);
            self.base
                .db()
                .query("SELECT * FROM customer WHERE id IN $ids")
                .bind(("ids", things))
                .await?
                .take(0)?
        };

        // Batch-load service lines, then their service names
        let order_refs: Vec<String> = orders
            .iter()
            .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
            .collect();
        let lines: Vec<OrderServiceLine> = self
            .base
            .db()
            .query("SELECT * FROM order_service_line WHERE order_id IN $ids")
            .bind(("ids", order_refs))
            .await?
            .take(0)?;
        let service_names = self.service_names_for(&lines).await?;

        let summaries = orders
            .into_iter()
            .map(|order| {
                let customer = customers
                    .iter()
                    .find(|c| {
                        c.id.as_ref()
                            .is_some_and(|id| id.to_string() == order.customer_id)
                    })
                    .cloned();
                let order_ref = order.id.as_ref().map(|id| id.to_string());
                let first_service_name = order_ref.and_then(|oref| {
                    lines
                        .iter()
                        .find(|l| l.order_id == oref)
                        .and_then(|l| service_names.get(&l.service_id).cloned())
                });
                OrderSummary {
                    order,
                    customer,
                    first_service_name,
                }
            })
            .collect();

        Ok(summaries)
    }

    /// Re-fetch one order with customer, services and materials joined
    pub async fn get_detail(&self, id: &str) -> RepoResult<ServiceOrderDetail> {
        let key = record_key(TABLE, id);
        let order: Option<ServiceOrder> = self.base.db().select((TABLE, key)).await?;
        let order =
            order.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let customer: Option<Customer> = {
            let ckey = record_key("customer", &order.customer_id).to_string();
            self.base.db().select(("customer", ckey.as_str())).await?
        };

        let order_ref = format!("{TABLE}:{key}");

        let service_lines: Vec<OrderServiceLine> = self
            .base
            .db()
            .query("SELECT * FROM order_service_line WHERE order_id = $oid")
            .bind(("oid", order_ref.clone()))
            .await?
            .take(0)?;
        let service_names = self.service_names_for(&service_lines).await?;
        let services = service_lines
            .into_iter()
            .map(|line| {
                let service_name = service_names.get(&line.service_id).cloned();
                JoinedServiceLine { line, service_name }
            })
            .collect();

        let material_lines: Vec<OrderMaterialLine> = self
            .base
            .db()
            .query("SELECT * FROM order_material_line WHERE order_id = $oid")
            .bind(("oid", order_ref))
            .await?
            .take(0)?;
        let material_ids: Vec<String> = material_lines
            .iter()
            .map(|l| l.material_id.clone())
            .collect();
        let catalog: Vec<Material> = if material_ids.is_empty() {
            Vec::new()
        } else {
            let things = parse_record_ids(&material_ids);
            self.base
                .db()
                .query("SELECT * FROM material WHERE id IN $ids")
                .bind(("ids", things))
                .await?
                .take(0)?
        };
        let materials = material_lines
            .into_iter()
            .map(|line| {
                let material = catalog
                    .iter()
                    .find(|m| {
                        m.id.as_ref()
                            .is_some_and(|id| id.to_string() == line.material_id)
                    })
                    .cloned();
                JoinedMaterialLine { line, material }
            })
            .collect();

        Ok(ServiceOrderDetail {
            order,
            customer,
            services,
            materials,
        })
    }

    /// Set the user-chosen lifecycle status. No transition order enforced.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<ServiceOrder> {
        let key = record_key(TABLE, id);
        let existing: Option<ServiceOrder> = self.base.db().select((TABLE, key)).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        let rid = RecordId::from_table_key(TABLE, key);
        self.base
            .db()
            .query("UPDATE $id SET status = $status")
            .bind(("id", rid))
            .bind(("status", status))
            .await?;

        let updated: Option<ServiceOrder> = self.base.db().select((TABLE, key)).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Delete an order and its line rows. Material lines go first, then
    /// service lines, then the order row itself.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        let existing: Option<ServiceOrder> = self.base.db().select((TABLE, key)).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        let order_ref = format!("{TABLE}:{key}");

        self.base
            .db()
            .query("DELETE order_material_line WHERE order_id = $oid")
            .bind(("oid", order_ref.clone()))
            .await
            .map_err(|e| RepoError::Database(format!("error deleting materials: {e}")))?;

        self.base
            .db()
            .query("DELETE order_service_line WHERE order_id = $oid")
            .bind(("oid", order_ref.clone()))
            .await
            .map_err(|e| RepoError::Database(format!("error deleting services: {e}")))?;

        let _: Option<ServiceOrder> = self.base.db().delete((TABLE, key)).await?;

        tracing::info!(order = %order_ref, "Service order deleted");
        Ok(true)
    }

    /// Resolve service names for a batch of lines: service id -> name
    async fn service_names_for(
        &self,
        lines: &[OrderServiceLine],
    ) -> RepoResult<std::collections::HashMap<String, String>> {
        let mut map = std::collections::HashMap::new();
        let ids: Vec<String> = lines.iter().map(|l| l.service_id.clone()).collect();
        if ids.is_empty() {
            return Ok(map);
        }
        let things = parse_record_ids(&ids);
        let services: Vec<shared::models::Service> = self
            .base
            .db()
            .query("SELECT * FROM service WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        for service in services {
            if let Some(id) = service.id.as_ref().map(|id| id.to_string()) {
                map.insert(id, service.name);
            }
        }
        Ok(map)
    }
}
