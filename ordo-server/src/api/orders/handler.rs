//! Service Order API Handlers
//!
//! The save flow mirrors the form submit: resolve (or create) the
//! customer, snapshot the aggregated totals, then hand the rows to the
//! repository for the sequential insert. Document endpoints assemble the
//! uniform document model from either a persisted order or a raw draft
//! payload and stream the rendered file.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use shared::models::{
    Customer, CustomerCreate, OrderStatus, ServiceOrder, ServiceOrderCreate,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{
    CompanyInfoRepository, CustomerRepository, MaterialRepository, NewMaterialLine,
    NewServiceLine, OrderSummary, ServiceOrderDetail, ServiceOrderRepository, ServiceRepository,
};
use crate::documents::{
    DocumentSource, DraftMaterialLine, DraftOrder, DraftServiceLine, HtmlRenderer, OrderDocument,
    PdfRenderer, fetch_logo,
};
use crate::pricing::{OrderTotals, parse_amount};
use crate::utils::{AppError, AppResult};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    let repo = ServiceOrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ServiceOrderDetail>> {
    let repo = ServiceOrderRepository::new(state.db.clone());
    let detail = repo.get_detail(&id).await?;
    Ok(Json(detail))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceOrderCreate>,
) -> AppResult<Json<ServiceOrder>> {
    payload.validate()?;

    let customer = resolve_customer(&state, &payload).await?;
    let customer_id = customer
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::Internal("created customer has no id".into()))?;

    // Join selected materials with their catalog rows; the unit price is
    // snapshotted from the catalog at save time
    let material_lines = resolve_material_lines(&state, &payload).await?;

    let service_lines: Vec<NewServiceLine> = payload
        .services
        .iter()
        .map(|line| NewServiceLine {
            service_id: line.service_id.clone(),
            price: parse_amount(&line.price),
            description: line.description.clone(),
        })
        .collect();

    let discount = payload.discount.as_deref().map(parse_amount).unwrap_or(0.0);
    let totals = OrderTotals::compute(
        material_lines.iter().map(|l| (l.unit_price, l.quantity)),
        service_lines.iter().map(|l| l.price),
        discount,
    );

    let order = ServiceOrder {
        id: None,
        customer_id,
        customer_phone: payload.customer_phone.clone().or(customer.phone),
        status: OrderStatus::Pending,
        address: payload.address.clone(),
        location_lat: payload.location_lat,
        location_lng: payload.location_lng,
        materials_amount: totals.materials_total,
        services_amount: totals.services_total,
        discount_amount: totals.discount,
        total_amount: totals.total,
        created_at: shared::util::now_millis(),
    };

    let repo = ServiceOrderRepository::new(state.db.clone());
    let created = repo.create(order, service_lines, material_lines).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ServiceOrder>> {
    let repo = ServiceOrderRepository::new(state.db.clone());
    let order = repo.update_status(&id, payload.status).await?;
    Ok(Json(order))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ServiceOrderRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Debug, Deserialize)]
pub struct DocumentParams {
    /// "pdf" (default) or "html"
    pub format: Option<String>,
}

/// Generate the document for a persisted order. Line items are re-fetched
/// and presentation totals recomputed from them.
pub async fn document(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(params): Query<DocumentParams>,
) -> AppResult<Response> {
    let repo = ServiceOrderRepository::new(state.db.clone());
    let detail = repo.get_detail(&id).await?;

    let document = assemble(&state, DocumentSource::Persisted(detail)).await?;

    match params.format.as_deref() {
        Some("html") => Ok(Html(HtmlRenderer::new().render(&document)).into_response()),
        _ => pdf_response(&document),
    }
}

/// Generate a document from an unsaved draft payload (label "NOVA")
pub async fn preview(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceOrderCreate>,
) -> AppResult<Response> {
    let customer_name = match (&payload.customer_name, &payload.customer_id) {
        (Some(name), _) if !name.trim().is_empty() => name.clone(),
        (_, Some(id)) => CustomerRepository::new(state.db.clone())
            .find_by_id(id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default(),
        _ => String::new(),
    };

    // Resolve catalog names for the draft lines
    let service_ids: Vec<String> = payload
        .services
        .iter()
        .map(|l| l.service_id.clone())
        .filter(|id| !id.is_empty())
        .collect();
    let services = ServiceRepository::new(state.db.clone())
        .find_by_ids(&service_ids)
        .await?;
    let name_of = |id: &str| {
        services
            .iter()
            .find(|s| s.id.as_ref().is_some_and(|sid| sid.to_string() == id))
            .map(|s| s.name.clone())
    };

    let material_ids: Vec<String> = payload
        .materials
        .iter()
        .map(|l| l.material_id.clone())
        .collect();
    let catalog = MaterialRepository::new(state.db.clone())
        .find_by_ids(&material_ids)
        .await?;

    let draft = DraftOrder {
        customer_name,
        customer_phone: payload.customer_phone.clone(),
        address: payload.address.clone(),
        services: payload
            .services
            .iter()
            .map(|line| DraftServiceLine {
                service_name: name_of(&line.service_id),
                price_raw: line.price.clone(),
                description: line.description.clone(),
            })
            .collect(),
        materials: payload
            .materials
            .iter()
            .filter_map(|line| {
                catalog
                    .iter()
                    .find(|m| {
                        m.id.as_ref()
                            .is_some_and(|mid| mid.to_string() == line.material_id)
                    })
                    .map(|material| DraftMaterialLine {
                        material: material.clone(),
                        quantity: line.quantity,
                    })
            })
            .collect(),
        discount_raw: payload.discount.clone(),
    };

    let document = assemble(&state, DocumentSource::Draft(draft)).await?;
    pdf_response(&document)
}

/// Fetch the letterhead (and best-effort logo) and assemble the document
/// with the render-time issue date
async fn assemble(state: &ServerState, source: DocumentSource) -> AppResult<OrderDocument> {
    let company = CompanyInfoRepository::new(state.db.clone())
        .get_or_create()
        .await?;

    let logo = match company.logo_url.as_deref() {
        Some(url) if !url.is_empty() => fetch_logo(&state.http, url).await,
        _ => None,
    };

    let issue_date = chrono::Utc::now().date_naive();
    Ok(OrderDocument::assemble(source, company, logo, issue_date))
}

fn pdf_response(document: &OrderDocument) -> AppResult<Response> {
    let bytes = PdfRenderer::render(document)?;
    let filename = document.suggested_filename();
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Use the referenced customer, or create one from the payload's
/// name/phone when no id was supplied
async fn resolve_customer(
    state: &ServerState,
    payload: &ServiceOrderCreate,
) -> AppResult<Customer> {
    let repo = CustomerRepository::new(state.db.clone());

    if let Some(id) = payload.customer_id.as_deref()
        && !id.is_empty()
    {
        return repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {id}")));
    }

    let name = payload
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("customer name is required"))?;

    let customer = repo
        .create(CustomerCreate {
            name: name.to_string(),
            phone: payload.customer_phone.clone(),
            email: None,
        })
        .await
        .map_err(|e| AppError::step("error creating customer", e))?;
    Ok(customer)
}

/// Join the selected materials with their catalog rows, clamping
/// quantities and snapshotting unit prices
async fn resolve_material_lines(
    state: &ServerState,
    payload: &ServiceOrderCreate,
) -> AppResult<Vec<NewMaterialLine>> {
    if payload.materials.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = payload
        .materials
        .iter()
        .map(|l| l.material_id.clone())
        .collect();
    let catalog = MaterialRepository::new(state.db.clone())
        .find_by_ids(&ids)
        .await?;

    payload
        .materials
        .iter()
        .map(|line| {
            let material = catalog
                .iter()
                .find(|m| {
                    m.id.as_ref()
                        .is_some_and(|mid| mid.to_string() == line.material_id)
                })
                .ok_or_else(|| {
                    AppError::validation(format!("unknown material: {}", line.material_id))
                })?;
            Ok(NewMaterialLine {
                material_id: material
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| line.material_id.clone()),
                quantity: line.quantity.max(1),
                unit_price: material.default_price,
            })
        })
        .collect()
}
