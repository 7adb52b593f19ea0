//! In-process tests for the catalog listing surface.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use machikado_core::{Category, ProductId, StreetId, Yen};
use machikado_storefront::db::{CatalogStore, MemoryStore};
use machikado_storefront::models::{NewProduct, NewProductSet, NewShop, NewStreet};

use common::{TestClient, json_body, test_app};

async fn seed_street(store: &MemoryStore, name: &str, slug: &str) -> StreetId {
    store
        .create_street(NewStreet {
            name: name.to_string(),
            slug: slug.to_string(),
        })
        .await
        .expect("street")
        .id
}

async fn seed_catalog(store: &MemoryStore) -> Vec<ProductId> {
    let street_id = seed_street(store, "中央通り", "chuo").await;
    let shop = store
        .create_shop(NewShop {
            street_id,
            name: "八百梅".to_string(),
            category: Category::Vegetable,
            description: "青果ひとすじ".to_string(),
            line_url: None,
            latitude: None,
            longitude: None,
        })
        .await
        .expect("shop");

    let mut ids = Vec::new();
    for (name, price, category, is_sale) in [
        ("大根", 200, Category::Vegetable, true),
        ("にんじん", 120, Category::Vegetable, false),
        ("食パン", 180, Category::Bread, false),
    ] {
        let product = store
            .create_product(NewProduct {
                name: name.to_string(),
                price: Yen::new(price),
                shop_id: Some(shop.id),
                category,
                is_sale,
                sale_price: is_sale.then(|| Yen::new(price - 50)),
            })
            .await
            .expect("product");
        ids.push(product.id);
    }
    ids
}

#[tokio::test]
async fn test_health_endpoints() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.request("GET", "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_street_and_shop_listing() {
    let store = Arc::new(MemoryStore::new());
    seed_catalog(&store).await;
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/streets", None).await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().expect("streets").len(), 1);

    let response = client.request("GET", "/streets/chuo/shops", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["street"]["name"], "中央通り");
    assert_eq!(body["shops"].as_array().expect("shops").len(), 1);

    let response = client.request("GET", "/streets/nowhere/shops", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_listing_filters_and_detail() {
    let store = Arc::new(MemoryStore::new());
    let ids = seed_catalog(&store).await;
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/products", None).await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().expect("products").len(), 3);

    let response = client
        .request("GET", "/products?category=vegetable", None)
        .await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().expect("products").len(), 2);

    // Unknown category tag lists nothing rather than erroring.
    let response = client.request("GET", "/products?category=fireworks", None).await;
    let body = json_body(response).await;
    assert!(body.as_array().expect("products").is_empty());

    let first = ids.first().expect("id");
    let response = client.request("GET", &format!("/products/{first}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "大根");
    // Effective price reflects the sale price.
    assert_eq!(body["effective_price"], 150);

    let response = client.request("GET", "/products/999999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sale_listing() {
    let store = Arc::new(MemoryStore::new());
    seed_catalog(&store).await;
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/sale", None).await;
    let body = json_body(response).await;
    let products = body.as_array().expect("products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "大根");
}

#[tokio::test]
async fn test_set_listing_and_detail() {
    let store = Arc::new(MemoryStore::new());
    let ids = seed_catalog(&store).await;
    store
        .create_set(NewProductSet {
            name: "おでんセット".to_string(),
            slug: Some("oden".to_string()),
            price: Yen::new(480),
            description: String::new(),
            product_ids: ids.clone(),
            is_active: true,
        })
        .await
        .expect("set");
    // Inactive sets never show up.
    store
        .create_set(NewProductSet {
            name: "非公開セット".to_string(),
            slug: Some("hidden".to_string()),
            price: Yen::new(100),
            description: String::new(),
            product_ids: vec![],
            is_active: false,
        })
        .await
        .expect("set");

    let mut client = TestClient::new(test_app(&store));

    let response = client.request("GET", "/sets", None).await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().expect("sets").len(), 1);

    let response = client.request("GET", "/sets/oden", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["set"]["name"], "おでんセット");
    assert_eq!(body["products"].as_array().expect("products").len(), 3);

    let response = client.request("GET", "/sets/hidden", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_aggregate() {
    let store = Arc::new(MemoryStore::new());
    let ids = seed_catalog(&store).await;
    store
        .create_set(NewProductSet {
            name: "晩ごはんセット".to_string(),
            slug: Some("dinner".to_string()),
            price: Yen::new(980),
            description: String::new(),
            product_ids: ids,
            is_active: true,
        })
        .await
        .expect("set");

    let mut client = TestClient::new(test_app(&store));
    let response = client.request("GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["sale_products"].as_array().expect("sale").len(), 1);
    assert_eq!(body["recommended_sets"].as_array().expect("sets").len(), 1);
    assert!(body["upcoming_events"].as_array().expect("events").is_empty());
}

#[tokio::test]
async fn test_orders_listing_after_checkout() {
    let store = Arc::new(MemoryStore::new());
    let ids = seed_catalog(&store).await;
    let first = ids.first().expect("id");

    let mut client = TestClient::new(test_app(&store));
    client
        .request("POST", &format!("/payments/checkout/{first}"), None)
        .await;

    let response = client.request("GET", "/orders", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let items = body.as_array().expect("orders");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["order"]["status"], "pending");
    assert_eq!(items[0]["product"]["name"], "大根");

    let order_id = items[0]["order"]["id"].as_i64().expect("id");
    let response = client.request("GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["shop"]["name"], "八百梅");
}
