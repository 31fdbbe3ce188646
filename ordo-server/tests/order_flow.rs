//! Order lifecycle integration tests
//!
//! Runs against a real embedded database in a temp directory: seed the
//! catalogs, save an order, verify the snapshot totals against a fresh
//! recomputation, exercise status updates and the cascade delete.

use chrono::NaiveDate;
use ordo_server::db::DbService;
use ordo_server::db::repository::{
    CompanyInfoRepository, CustomerRepository, MaterialRepository, NewMaterialLine,
    NewServiceLine, RepoError, ServiceOrderRepository, ServiceRepository,
};
use ordo_server::documents::{DocumentSource, HtmlRenderer, OrderDocument, PdfRenderer};
use ordo_server::pricing::OrderTotals;
use shared::models::{
    Address, CompanyInfoUpdate, CustomerCreate, MaterialCreate, OrderMaterialLine,
    OrderServiceLine, OrderStatus, ServiceCreate, ServiceOrder,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

async fn test_db() -> (TempDir, Surreal<Db>) {
    let tmp = TempDir::new().expect("temp dir");
    let service = DbService::new(tmp.path()).await.expect("open database");
    (tmp, service.db)
}

struct Seeded {
    customer_id: String,
    service_id: String,
    material_id: String,
}

/// Seed one customer, one service (45.00) and one material (10.00/m)
async fn seed(db: &Surreal<Db>) -> Seeded {
    let customer = CustomerRepository::new(db.clone())
        .create(CustomerCreate {
            name: "João Pereira".to_string(),
            phone: Some("(11) 99999-0000".to_string()),
            email: None,
        })
        .await
        .expect("create customer");

    let service = ServiceRepository::new(db.clone())
        .create(ServiceCreate {
            name: "Instalação de ar-condicionado".to_string(),
            default_price: Some(45.0),
        })
        .await
        .expect("create service");

    let material = MaterialRepository::new(db.clone())
        .create(MaterialCreate {
            name: "Tubo de cobre".to_string(),
            unit: Some("m".to_string()),
            default_price: Some(10.0),
            is_custom: None,
        })
        .await
        .expect("create material");

    Seeded {
        customer_id: customer.id.unwrap().to_string(),
        service_id: service.id.unwrap().to_string(),
        material_id: material.id.unwrap().to_string(),
    }
}

fn order_row(seeded: &Seeded, totals: &OrderTotals) -> ServiceOrder {
    ServiceOrder {
        id: None,
        customer_id: seeded.customer_id.clone(),
        customer_phone: Some("(11) 99999-0000".to_string()),
        status: OrderStatus::Pending,
        address: Address {
            street: "Rua das Flores".to_string(),
            number: "120".to_string(),
            complement: None,
            neighborhood: "Centro".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "01000-000".to_string(),
        },
        location_lat: None,
        location_lng: None,
        materials_amount: totals.materials_total,
        services_amount: totals.services_total,
        discount_amount: totals.discount,
        total_amount: totals.total,
        created_at: shared::util::now_millis(),
    }
}

async fn save_standard_order(db: &Surreal<Db>, seeded: &Seeded) -> ServiceOrder {
    // One material (10.00 x 3) + one service (45.00) - discount 5.00
    let totals = OrderTotals::compute([(10.0, 3)], [45.0], 5.0);
    ServiceOrderRepository::new(db.clone())
        .create(
            order_row(seeded, &totals),
            vec![NewServiceLine {
                service_id: seeded.service_id.clone(),
                price: 45.0,
                description: Some("Split 12000 BTUs".to_string()),
            }],
            vec![NewMaterialLine {
                material_id: seeded.material_id.clone(),
                quantity: 3,
                unit_price: 10.0,
            }],
        )
        .await
        .expect("create order")
}

#[tokio::test]
async fn order_save_and_detail_roundtrip() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    let created = save_standard_order(&db, &seeded).await;

    assert!(created.id.is_some());
    assert_eq!(created.total_amount, 70.0);

    let detail = ServiceOrderRepository::new(db.clone())
        .get_detail(&created.id.as_ref().unwrap().to_string())
        .await
        .expect("detail");

    assert_eq!(detail.order.materials_amount, 30.0);
    assert_eq!(detail.order.services_amount, 45.0);
    assert_eq!(detail.order.discount_amount, 5.0);
    assert_eq!(detail.order.total_amount, 70.0);

    assert_eq!(detail.customer.as_ref().unwrap().name, "João Pereira");
    assert_eq!(detail.services.len(), 1);
    assert_eq!(
        detail.services[0].service_name.as_deref(),
        Some("Instalação de ar-condicionado")
    );
    assert_eq!(detail.materials.len(), 1);
    assert_eq!(
        detail.materials[0].material.as_ref().unwrap().name,
        "Tubo de cobre"
    );

    // Recomputing presentation figures from the fetched lines must agree
    // with the stored snapshot for an unmodified order
    let recomputed = OrderTotals::compute(
        detail
            .materials
            .iter()
            .map(|m| (m.line.unit_price, m.line.quantity)),
        detail.services.iter().map(|s| s.line.price),
        detail.order.discount_amount,
    );
    assert_eq!(recomputed.total, detail.order.total_amount);
    assert_eq!(recomputed.materials_total, detail.order.materials_amount);
    assert_eq!(recomputed.services_total, detail.order.services_amount);
}

#[tokio::test]
async fn persisted_order_renders_document_with_snapshot_figures() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    let created = save_standard_order(&db, &seeded).await;

    let detail = ServiceOrderRepository::new(db.clone())
        .get_detail(&created.id.as_ref().unwrap().to_string())
        .await
        .expect("detail");

    let company = CompanyInfoRepository::new(db.clone())
        .update(CompanyInfoUpdate {
            name: Some("Clima Norte Ltda".to_string()),
            tax_id: Some("12.345.678/0001-00".to_string()),
            ..Default::default()
        })
        .await
        .expect("company info");

    let document = OrderDocument::assemble(
        DocumentSource::Persisted(detail),
        company,
        None,
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
    );

    assert_ne!(document.label, "NOVA");
    assert_eq!(document.totals.total, 70.0);

    let html = HtmlRenderer::new().render(&document);
    assert!(html.contains("R$ 45.00"));
    assert!(html.contains("R$ 30.00"));
    assert!(html.contains("R$ 5.00"));
    assert!(html.contains("R$ 70.00"));
    assert!(html.contains("Clima Norte Ltda"));

    // Same document, same injected date: identical fragment
    assert_eq!(html, HtmlRenderer::new().render(&document));

    let pdf = PdfRenderer::render(&document).expect("pdf");
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn status_is_user_settable_in_any_order() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    let created = save_standard_order(&db, &seeded).await;
    let id = created.id.as_ref().unwrap().to_string();
    let repo = ServiceOrderRepository::new(db.clone());

    let order = repo
        .update_status(&id, OrderStatus::Completed)
        .await
        .expect("status");
    assert_eq!(order.status, OrderStatus::Completed);

    // No enforced transition order: back to pending is allowed
    let order = repo
        .update_status(&id, OrderStatus::Pending)
        .await
        .expect("status");
    assert_eq!(order.status, OrderStatus::Pending);

    let missing = repo
        .update_status("service_order:does_not_exist", OrderStatus::InProgress)
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn list_shows_snapshot_totals_newest_first() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    save_standard_order(&db, &seeded).await;

    let second_totals = OrderTotals::compute(std::iter::empty(), [100.0], 0.0);
    let mut second = order_row(&seeded, &second_totals);
    second.created_at += 1000;
    ServiceOrderRepository::new(db.clone())
        .create(
            second,
            vec![NewServiceLine {
                service_id: seeded.service_id.clone(),
                price: 100.0,
                description: None,
            }],
            Vec::new(),
        )
        .await
        .expect("create order");

    let summaries = ServiceOrderRepository::new(db.clone())
        .find_all()
        .await
        .expect("list");
    assert_eq!(summaries.len(), 2);
    // Newest first; displayed totals come from the snapshot columns
    assert_eq!(summaries[0].order.total_amount, 100.0);
    assert_eq!(summaries[1].order.total_amount, 70.0);
    assert_eq!(
        summaries[1].customer.as_ref().map(|c| c.name.as_str()),
        Some("João Pereira")
    );
    assert_eq!(
        summaries[1].first_service_name.as_deref(),
        Some("Instalação de ar-condicionado")
    );
}

#[tokio::test]
async fn delete_removes_line_rows_then_order() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    let created = save_standard_order(&db, &seeded).await;
    let id = created.id.as_ref().unwrap().to_string();
    let repo = ServiceOrderRepository::new(db.clone());

    repo.delete(&id).await.expect("delete");

    // Fetching afterwards fails with a not-found condition
    let gone = repo.get_detail(&id).await;
    assert!(matches!(gone, Err(RepoError::NotFound(_))));
    let again = repo.delete(&id).await;
    assert!(matches!(again, Err(RepoError::NotFound(_))));

    // No orphaned line rows survive
    let material_lines: Vec<OrderMaterialLine> = db
        .query("SELECT * FROM order_material_line")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(material_lines.is_empty());
    let service_lines: Vec<OrderServiceLine> = db
        .query("SELECT * FROM order_service_line")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(service_lines.is_empty());
}

#[tokio::test]
async fn deleting_a_material_clears_its_usage_rows() {
    let (_tmp, db) = test_db().await;
    let seeded = seed(&db).await;
    save_standard_order(&db, &seeded).await;

    MaterialRepository::new(db.clone())
        .delete(&seeded.material_id)
        .await
        .expect("delete material");

    let lines: Vec<OrderMaterialLine> = db
        .query("SELECT * FROM order_material_line")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(lines.is_empty());

    // The order itself survives with its snapshot intact
    let summaries = ServiceOrderRepository::new(db.clone())
        .find_all()
        .await
        .expect("list");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].order.total_amount, 70.0);
}

#[tokio::test]
async fn company_info_singleton_roundtrip() {
    let (_tmp, db) = test_db().await;
    let repo = CompanyInfoRepository::new(db.clone());

    // First access creates the empty singleton
    let info = repo.get_or_create().await.expect("get_or_create");
    assert_eq!(info.name, "");

    let updated = repo
        .update(CompanyInfoUpdate {
            name: Some("Clima Norte Ltda".to_string()),
            tax_id: Some("12.345.678/0001-00".to_string()),
            phone: Some("(11) 3333-4444".to_string()),
            ..Default::default()
        })
        .await
        .expect("update");
    assert_eq!(updated.name, "Clima Norte Ltda");
    assert!(updated.updated_at.is_some());

    // Partial update leaves other fields untouched
    let updated = repo
        .update(CompanyInfoUpdate {
            phone: Some("(11) 5555-6666".to_string()),
            ..Default::default()
        })
        .await
        .expect("update");
    assert_eq!(updated.name, "Clima Norte Ltda");
    assert_eq!(updated.phone.as_deref(), Some("(11) 5555-6666"));
}
