//! Integration tests for the storefront HTTP API.
//!
//! Each test starts the server in-process against a seeded in-memory store
//! and exercises the API the way the browser front-end does.

use medstock_core::{catalog::RawFields, DocumentStore, MedstockApi, MemoryStore, StoredDocument};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const ADMIN_EMAIL: &str = "support@medstock.example.com";

fn part(id: &str, description: &str, brand: &str, part_number: &str) -> StoredDocument {
    let mut fields = RawFields::new();
    fields.insert("DESCRIPTION".into(), json!(description));
    fields.insert("BRAND".into(), json!(brand));
    fields.insert("PART NUMBER".into(), json!(part_number));
    StoredDocument {
        id: id.into(),
        fields,
    }
}

async fn start_seeded_server() -> (u16, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(
            "products",
            vec![
                part("p1", "Siemens Head Coil", "Siemens", "123-456"),
                part("p2", "GE Monitor Cable", "GE", "789"),
            ],
        )
        .await;
    let mut fields = RawFields::new();
    fields.insert("DESCRIPTION".into(), json!("MRI Scanner"));
    fields.insert("MANUFACTURER".into(), json!("Philips"));
    store
        .seed(
            "Systems",
            vec![StoredDocument {
                id: "s1".into(),
                fields,
            }],
        )
        .await;

    let api = MedstockApi::builder().store(store.clone()).build().unwrap();
    let addr = medstock_web::start_server(api, "127.0.0.1", 0)
        .await
        .unwrap();
    (addr.port(), store)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (port, _store) = start_seeded_server().await;
    let body: Value = client()
        .get(format!("http://127.0.0.1:{}/health", port))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_browse_filters_and_paginates() {
    let (port, _store) = start_seeded_server().await;
    let body: Value = client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts?search=siemenshead",
            port
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["match_count"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["items"][0]["id"], "p1");
    assert_eq!(body["load_failed"], false);
}

#[tokio::test]
async fn test_browse_unknown_category_is_404() {
    let (port, _store) = start_seeded_server().await;
    let response = client()
        .get(format!("http://127.0.0.1:{}/api/products/gadgets", port))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_browse_logs_part_search() {
    let (port, store) = start_seeded_server().await;
    client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts?search=coil",
            port
        ))
        .send()
        .await
        .unwrap();
    // Fire-and-forget write; give it a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.len("searchLogs").await, 1);
}

#[tokio::test]
async fn test_repeated_search_logged_once() {
    let (port, store) = start_seeded_server().await;
    let url = format!(
        "http://127.0.0.1:{}/api/products/Parts?search=coil",
        port
    );

    // Refreshes and history replays re-issue the identical request.
    for _ in 0..3 {
        client().get(&url).send().await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.len("searchLogs").await, 1);

    // A distinct term still gets its own record.
    client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts?search=cable",
            port
        ))
        .send()
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.len("searchLogs").await, 2);
}

#[tokio::test]
async fn test_export_requires_admin() {
    let (port, _store) = start_seeded_server().await;
    let response = client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts/export",
            port
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_export_csv_with_filtered_filename() {
    let (port, _store) = start_seeded_server().await;
    let response = client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts/export?brand=GE",
            port
        ))
        .header("x-admin-email", ADMIN_EMAIL)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/csv"
    );
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("medstock_parts_ge.csv"));
    let csv = response.text().await.unwrap();
    assert_eq!(csv.lines().count(), 2); // header + the one GE row
    assert!(csv.contains("\"GE Monitor Cable\""));
}

#[tokio::test]
async fn test_export_empty_result_is_rejected() {
    let (port, _store) = start_seeded_server().await;
    let response = client()
        .get(format!(
            "http://127.0.0.1:{}/api/products/Parts/export?search=nothing",
            port
        ))
        .header("x-admin-email", ADMIN_EMAIL)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_product_detail_lookup() {
    let (port, _store) = start_seeded_server().await;
    let body: Value = client()
        .get(format!("http://127.0.0.1:{}/api/product/s1", port))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["category"], "system");
    assert_eq!(body["brand"], "Philips");

    let missing = client()
        .get(format!("http://127.0.0.1:{}/api/product/nope", port))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_contact_validation() {
    let (port, _store) = start_seeded_server().await;
    let response = client()
        .post(format!("http://127.0.0.1:{}/api/contact", port))
        .json(&json!({"name": "Ada", "email": "", "message": "Hi"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_admin_item_lifecycle() {
    let (port, store) = start_seeded_server().await;
    let http = client();
    let base = format!("http://127.0.0.1:{}/api/admin/Parts", port);

    // Unauthenticated create is rejected.
    let response = http
        .post(&base)
        .json(&json!({"description": "New Coil"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // Create.
    let response = http
        .post(&base)
        .header("x-admin-email", ADMIN_EMAIL)
        .json(&json!({"description": "New Coil", "brand": "Siemens", "price": "100"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(store.len("products").await, 3);

    // Update writes the historical part spelling.
    let response = http
        .patch(format!("{}/{}", base, id))
        .header("x-admin-email", ADMIN_EMAIL)
        .json(&json!({"description": "New Coil", "modality": "MRI"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let doc = store.fetch_one("products", &id).await.unwrap();
    assert_eq!(doc.fields["MODELITY"], "MRI");

    // Delete.
    let response = http
        .delete(format!("{}/{}", base, id))
        .header("x-admin-email", ADMIN_EMAIL)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert_eq!(store.len("products").await, 2);
}
