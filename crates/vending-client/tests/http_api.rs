//! HTTP contract tests against a mock REST store.

use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use vending_client::{
    ApiClient, ApiConfig, ClientError, ProductStore, TransactionStore, VendingStore,
};
use vending_core::{
    Category, Denomination, Money, NewTransaction, ProductDraft, ProductPatch, PurchaseSession,
    RecordId,
};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(server.base_url())).unwrap()
}

fn teh_botol() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Teh Botol",
        "price": 8000,
        "stock": 1,
        "image": "https://example.com/teh.jpg",
        "category": "minuman"
    })
}

fn draft() -> ProductDraft {
    ProductDraft {
        name: "Teh Botol".to_string(),
        price: Money::from_rupiah(8000),
        stock: 1,
        image: "https://example.com/teh.jpg".to_string(),
        category: Category::Drink,
    }
}

#[tokio::test]
async fn test_list_products_sends_no_cache_and_request_id() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/products")
                .header("cache-control", "no-cache")
                .header_exists("x-request-id");
            then.status(200).json_body(json!([teh_botol()]));
        })
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    mock.assert_async().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, RecordId::Number(1));
    assert_eq!(products[0].price, Money::from_rupiah(8000));
    assert_eq!(products[0].category, Category::Drink);
}

#[tokio::test]
async fn test_string_ids_from_newer_store() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/ab12");
            then.status(200).json_body(json!({
                "id": "ab12",
                "name": "Chitato",
                "price": 10000,
                "stock": 4,
                "image": "https://example.com/chitato.jpg",
                "category": "makanan"
            }));
        })
        .await;

    let product = client_for(&server)
        .get_product(&RecordId::Text("ab12".to_string()))
        .await
        .unwrap();

    assert_eq!(product.id, RecordId::Text("ab12".to_string()));
    assert_eq!(product.category, Category::Food);
}

#[tokio::test]
async fn test_create_posts_draft_without_id() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/products").json_body(json!({
                "name": "Teh Botol",
                "price": 8000,
                "stock": 1,
                "image": "https://example.com/teh.jpg",
                "category": "minuman"
            }));
            then.status(201).json_body(teh_botol());
        })
        .await;

    let created = client_for(&server).create_product(&draft()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, RecordId::Number(1));
}

#[tokio::test]
async fn test_replace_puts_full_product_with_id() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/products/1").json_body(teh_botol());
            then.status(200).json_body(teh_botol());
        })
        .await;

    client_for(&server)
        .replace_product(&RecordId::Number(1), &draft())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_patch_sends_only_stock() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/products/1")
                .json_body(json!({ "stock": 0 }));
            then.status(200).json_body(json!({
                "id": 1,
                "name": "Teh Botol",
                "price": 8000,
                "stock": 0,
                "image": "https://example.com/teh.jpg",
                "category": "minuman"
            }));
        })
        .await;

    let patched = client_for(&server)
        .patch_product(&RecordId::Number(1), &ProductPatch::stock(0))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(patched.stock, 0);
}

#[tokio::test]
async fn test_delete_ignores_response_body() {
    let server = MockServer::start_async().await;

    // Older stores answer `{}`, newer ones the deleted product.
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/products/1");
            then.status(200).body("{}");
        })
        .await;

    client_for(&server)
        .delete_product(&RecordId::Number(1))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_statuses_are_errors() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/transactions");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/99");
            then.status(404).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/products");
            then.status(400);
        })
        .await;

    let client = client_for(&server);

    match client.list_transactions().await {
        Err(ClientError::Status { method, path, status }) => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/transactions");
            assert_eq!(status, 503);
        }
        other => panic!("unexpected: {:?}", other),
    }

    assert!(client
        .get_product(&RecordId::Number(99))
        .await
        .unwrap_err()
        .is_not_found());

    assert_eq!(
        client.create_product(&draft()).await.unwrap_err().status(),
        Some(400)
    );
}

#[tokio::test]
async fn test_bad_json_is_decode_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    assert!(matches!(
        client_for(&server).list_products().await,
        Err(ClientError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_store_is_request_error() {
    let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:9")).unwrap();
    assert!(matches!(
        client.list_products().await,
        Err(ClientError::Request(_))
    ));
}

#[tokio::test]
async fn test_create_transaction_is_camel_case() {
    let server = MockServer::start_async().await;

    let body = json!({
        "productId": 1,
        "productName": "Teh Botol",
        "price": 8000,
        "moneyInserted": 10000,
        "change": 2000,
        "timestamp": "2026-01-20T10:05:00Z"
    });

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/transactions").json_body(body.clone());
            let mut created = body.clone();
            created["id"] = json!(1);
            then.status(201).json_body(created);
        })
        .await;

    let tx = client_for(&server)
        .create_transaction(&NewTransaction {
            product_id: RecordId::Number(1),
            product_name: "Teh Botol".to_string(),
            price: Money::from_rupiah(8000),
            money_inserted: Money::from_rupiah(10000),
            change: Money::from_rupiah(2000),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 20, 10, 5, 0).unwrap(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tx.id, RecordId::Number(1));
}

#[tokio::test]
async fn test_record_purchase_patches_then_posts() {
    let server = MockServer::start_async().await;

    let patch = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/products/1")
                .json_body(json!({ "stock": 0 }));
            then.status(200).json_body(teh_botol());
        })
        .await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST).path("/transactions");
            then.status(500);
        })
        .await;

    let mut session = PurchaseSession::new();
    let product = serde_json::from_value(teh_botol()).unwrap();
    session.select_product(&product).unwrap();
    session.advance();
    for d in [Denomination::Rp5000, Denomination::Rp5000] {
        session.propose_money(d).unwrap();
        session.commit_money().unwrap();
    }
    let plan = session.prepare_payment(Utc::now()).unwrap();

    let err = client_for(&server).record_purchase(&plan).await.unwrap_err();

    patch.assert_async().await;
    post.assert_async().await;
    assert_eq!(err.status(), Some(500));
}

struct ErrorEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == Level::ERROR && meta.target().starts_with("vending") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn test_each_failed_request_logs_one_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/7");
            then.status(404);
        })
        .await;

    let count = Arc::new(AtomicUsize::new(0));
    let _guard = tracing::subscriber::set_default(
        tracing_subscriber::registry().with(ErrorEvents(count.clone())),
    );

    let client = client_for(&server);
    assert!(client.list_products().await.is_err());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    assert!(client.get_product(&RecordId::Number(7)).await.is_err());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
