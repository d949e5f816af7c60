//! Handler tests for Items domain
//!
//! These tests drive the items router over HTTP against the in-memory store:
//! - Request deserialization (JSON → Item)
//! - Response serialization and headers
//! - HTTP status codes
//! - Error responses
//!
//! Only the items router is exercised, not the full application.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use axum_helpers::ErrorResponse;
use chrono::{Duration, Utc};
use domain_items::{AuctionableStatus, InMemoryItemStore, Item, ItemService, ItemStore, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(store: InMemoryItemStore) -> Router {
    handlers::router(ItemService::new(store))
}

fn item_json(id: &str, owner_id: &str, start_offset_days: i64, end_offset_days: i64) -> Value {
    let now = Utc::now();
    json!({
        "id": id,
        "itemId": "LOT-1",
        "ownerId": owner_id,
        "title": "Carved chair",
        "description": "Walnut, 1920s",
        "startAuctionDateTime": now + Duration::days(start_offset_days),
        "endAuctionDateTime": now + Duration::days(end_offset_days),
        "startPrice": 100.0,
        "vurderetPrice": 300.0
    })
}

fn request(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn seed(store: &InMemoryItemStore, body: Value) -> Item {
    let response = app(store.clone())
        .oneshot(request("POST", "/", Some(&body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_item_returns_201_with_location() {
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let body = item_json("", &builder.owner_id(), -1, 1);

    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();

    let item: Item = json_body(response.into_body()).await;
    assert!(!item.id.is_empty());
    assert_eq!(location, format!("/item/{}", item.id));
    assert_eq!(item.owner_id, builder.owner_id());
    assert_eq!(item.estimated_value, 300.0);
}

#[tokio::test]
async fn test_create_item_keeps_client_id() {
    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&item_json("lot-42", "user_1", -1, 1))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/item/lot-42");
}

#[tokio::test]
async fn test_create_null_body_returns_400() {
    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&Value::Null)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Item cannot be null.");
}

#[tokio::test]
async fn test_create_duplicate_id_returns_409() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("dup", "user_1", -1, 1)).await;

    let response = app(store.clone())
        .oneshot(request("POST", "/", Some(&item_json("dup", "user_2", -1, 1))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "An item with the same ID already exists.");

    // The original record is untouched
    let items = store.get_all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].owner_id, "user_1");
}

#[tokio::test]
async fn test_create_invalid_item_returns_400() {
    let mut body = item_json("", "user_1", -1, 1);
    body["title"] = json!("");

    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_malformed_json_returns_400() {
    let response = app(InMemoryItemStore::new())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_body_missing_fields_returns_400() {
    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&json!({ "title": "t" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.message.contains("ownerId"));
}

#[tokio::test]
async fn test_create_wrong_field_type_returns_400() {
    let mut body = item_json("", "user_1", -1, 1);
    body["startPrice"] = json!("cheap");

    let response = app(InMemoryItemStore::new())
        .oneshot(request("POST", "/", Some(&body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_body_missing_fields_returns_400() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("a", "user_1", -1, 1)).await;

    let response = app(store)
        .oneshot(request("PUT", "/a", Some(&json!({ "id": "a", "title": "t" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_get_item_found_and_missing() {
    let store = InMemoryItemStore::new();
    let created = seed(&store, item_json("a", "user_1", -1, 1)).await;

    let response = app(store.clone())
        .oneshot(request("GET", "/a", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item, created);

    let response = app(store).oneshot(request("GET", "/zzz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Item not found.");
}

#[tokio::test]
async fn test_list_all_items() {
    let store = InMemoryItemStore::new();
    let response = app(store.clone())
        .oneshot(request("GET", "/all", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert!(items.is_empty());

    seed(&store, item_json("a", "user_1", -1, 1)).await;
    seed(&store, item_json("b", "user_2", 1, 2)).await;

    let response = app(store).oneshot(request("GET", "/all", None)).await.unwrap();
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_repeated_reads_without_mutation_are_identical() {
    let store = InMemoryItemStore::new();
    for (id, owner) in [("c", "user_1"), ("a", "user_2"), ("b", "user_1")] {
        seed(&store, item_json(id, owner, -1, 1)).await;
    }

    let mut lists = Vec::new();
    let mut singles = Vec::new();
    for _ in 0..2 {
        let response = app(store.clone()).oneshot(request("GET", "/all", None)).await.unwrap();
        let items: Vec<Item> = json_body(response.into_body()).await;
        lists.push(items);

        let response = app(store.clone()).oneshot(request("GET", "/a", None)).await.unwrap();
        let item: Item = json_body(response.into_body()).await;
        singles.push(item);
    }

    assert_eq!(lists[0], lists[1]);
    let ids: Vec<&str> = lists[0].iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(singles[0], singles[1]);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_item_keeps_created_date() {
    let store = InMemoryItemStore::new();
    let created = seed(&store, item_json("a", "user_1", -1, 1)).await;

    let mut body = item_json("a", "user_1", -1, 1);
    body["title"] = json!("Restored chair");
    body["createdDate"] = json!("2001-01-01T00:00:00Z");

    let response = app(store).oneshot(request("PUT", "/a", Some(&body))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Item = json_body(response.into_body()).await;
    assert_eq!(updated.title, "Restored chair");
    assert_eq!(updated.created_date, created.created_date);
}

#[tokio::test]
async fn test_update_id_mismatch_returns_400() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("a", "user_1", -1, 1)).await;

    let response = app(store)
        .oneshot(request("PUT", "/a", Some(&item_json("b", "user_1", -1, 1))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "ID mismatch.");
}

#[tokio::test]
async fn test_update_missing_item_returns_404() {
    let response = app(InMemoryItemStore::new())
        .oneshot(request("PUT", "/ghost", Some(&item_json("ghost", "user_1", -1, 1))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_item_then_404() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("a", "user_1", -1, 1)).await;

    let response = app(store.clone())
        .oneshot(request("DELETE", "/a", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app(store.clone())
        .oneshot(request("DELETE", "/a", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(store).oneshot(request("GET", "/a", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_list_auctionable_items() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("open", "user_1", -1, 1)).await;
    seed(&store, item_json("ended", "user_1", -3, -2)).await;
    seed(&store, item_json("upcoming", "user_1", 1, 2)).await;

    let response = app(store)
        .oneshot(request("GET", "/auctionable", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response.into_body()).await;
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["open"]);
}

#[tokio::test]
async fn test_list_items_by_owner() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("a", "user_123", -1, 1)).await;
    seed(&store, item_json("b", "user_456", -1, 1)).await;
    seed(&store, item_json("c", "user_123", 1, 2)).await;

    let response = app(store.clone())
        .oneshot(request("GET", "/owner/user_123", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.owner_id == "user_123"));

    let response = app(store)
        .oneshot(request("GET", "/owner/nobody", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_is_item_auctionable() {
    let store = InMemoryItemStore::new();
    seed(&store, item_json("open", "user_1", -1, 1)).await;
    seed(&store, item_json("upcoming", "user_1", 1, 2)).await;

    let response = app(store.clone())
        .oneshot(request("GET", "/open/auctionable", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status: Value = json_body(response.into_body()).await;
    assert_eq!(status, json!({ "id": "open", "auctionable": true }));

    let response = app(store.clone())
        .oneshot(request("GET", "/upcoming/auctionable", None))
        .await
        .unwrap();
    let status: AuctionableStatus = json_body(response.into_body()).await;
    assert!(!status.auctionable);

    let response = app(store)
        .oneshot(request("GET", "/missing/auctionable", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
