//! HTTP API integration tests
//!
//! Drives the full router in-process with oneshot requests against a
//! temp-dir database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use ordo_server::db::DbService;
use ordo_server::{Config, ServerState, api};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (TempDir, Router) {
    let tmp = TempDir::new().expect("temp dir");
    let service = DbService::new(tmp.path()).await.expect("open database");
    let state = ServerState {
        config: Arc::new(Config {
            work_dir: tmp.path().display().to_string(),
            http_port: 0,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }),
        db: service.db,
        http: reqwest::Client::new(),
    };
    (tmp, api::build_app(state))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (_tmp, app) = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn order_create_then_document_download() {
    let (_tmp, app) = test_app().await;

    // Seed the catalogs through the API
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/services",
            serde_json::json!({ "name": "Limpeza", "default_price": 150.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let service = body_json(response).await;
    let service_id = service["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/materials",
            serde_json::json!({ "name": "Gás R410", "unit": "kg", "default_price": 80.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let material = body_json(response).await;
    let material_id = material["id"].as_str().unwrap().to_string();

    // Save an order: service typed as "150,00", 2kg of gas, discount "10,00"
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            serde_json::json!({
                "customer_name": "Maria Souza",
                "customer_phone": "(11) 98888-7777",
                "services": [
                    { "service_id": service_id, "price": "150,00" }
                ],
                "materials": [
                    { "material_id": material_id, "quantity": 2 }
                ],
                "address": {
                    "street": "Rua A", "number": "1", "neighborhood": "Centro",
                    "city": "São Paulo", "state": "SP", "zip_code": "01000-000"
                },
                "discount": "10,00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["services_amount"], 150.0);
    assert_eq!(order["materials_amount"], 160.0);
    assert_eq!(order["total_amount"], 300.0);
    assert_eq!(order["status"], "pending");
    let order_id = order["id"].as_str().unwrap().to_string();

    // HTML document shows the same figures
    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/orders/{order_id}/document?format=html"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("R$ 150.00"));
    assert!(html.contains("R$ 160.00"));
    assert!(html.contains("R$ 300.00"));
    assert!(html.contains("Maria Souza"));

    // PDF download carries the deterministic filename
    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/orders/{order_id}/document"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"ordem_servico_"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn draft_preview_uses_placeholder_label() {
    let (_tmp, app) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders/document/preview",
            serde_json::json!({
                "customer_name": "Cliente Novo",
                "services": [ { "service_id": "", "price": "45,00" } ],
                "materials": [],
                "address": {}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        disposition,
        "attachment; filename=\"ordem_servico_NOVA.pdf\""
    );
}

#[tokio::test]
async fn order_without_customer_is_rejected_before_any_write() {
    let (_tmp, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            serde_json::json!({
                "services": [ { "service_id": "", "price": "10" } ],
                "materials": [],
                "address": {}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was persisted
    let response = app
        .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_order_document_is_not_found() {
    let (_tmp, app) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/api/orders/service_order:missing/document")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
