//! In-process tests for the consult router.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use machikado_core::{Category, StreetId};
use machikado_storefront::db::{CatalogStore, MemoryStore};
use machikado_storefront::models::{NewShop, NewStreet};

use common::{TestClient, json_body, test_app};

async fn seed_street(store: &MemoryStore) -> StreetId {
    store
        .create_street(NewStreet {
            name: "中央通り".to_string(),
            slug: "chuo".to_string(),
        })
        .await
        .expect("street")
        .id
}

async fn seed_shop(store: &MemoryStore, street_id: StreetId, name: &str) {
    store
        .create_shop(NewShop {
            street_id,
            name: name.to_string(),
            category: Category::Meat,
            description: String::new(),
            line_url: None,
            latitude: None,
            longitude: None,
        })
        .await
        .expect("shop");
}

#[tokio::test]
async fn test_preset_routes_to_mapped_shop_with_message() {
    let store = Arc::new(MemoryStore::new());
    let street_id = seed_street(&store).await;
    seed_shop(&store, street_id, "肉のマルフク").await;

    let mut client = TestClient::new(test_app(&store));
    let response = client
        .request(
            "GET",
            "/consult?preset=bbq&product=%E7%89%9B%E3%82%AB%E3%83%AB%E3%83%93&quantity=4",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["shop"]["name"], "肉のマルフク");
    assert_eq!(body["preset"]["key"], "bbq");
    let message = body["message"].as_str().expect("message");
    assert!(message.starts_with("肉のマルフクさん、こんにちは。"));
    assert!(message.contains("牛カルビ × 4"));
    assert!(message.contains("・人数: "));
}

#[tokio::test]
async fn test_unmapped_preset_falls_back_to_menu() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/consult?preset=karaoke", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let presets = body["presets"].as_array().expect("menu");
    assert_eq!(presets.len(), 6);
}

#[tokio::test]
async fn test_mapped_preset_with_missing_shop_falls_back_to_menu() {
    // The preset table maps "bbq", but the catalog has no such shop.
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/consult?preset=bbq", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["presets"].is_array());
}

#[tokio::test]
async fn test_direct_shop_consult() {
    let store = Arc::new(MemoryStore::new());
    let street_id = seed_street(&store).await;
    seed_shop(&store, street_id, "八百梅").await;
    let shop = store.shop_by_name("八百梅").await.expect("query").expect("shop");

    let mut client = TestClient::new(test_app(&store));
    let response = client
        .request("GET", &format!("/consult/shops/{}", shop.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["shop"]["name"], "八百梅");
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("・相談したいこと: "));

    let response = client.request("GET", "/consult/shops/999999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
