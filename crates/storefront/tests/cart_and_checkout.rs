//! In-process tests for the cart and checkout flows.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use machikado_core::{Category, Yen};
use machikado_storefront::db::{CatalogStore, MemoryStore};
use machikado_storefront::models::{NewProduct, NewProductSet};

use common::{TestClient, json_body, test_app};

fn new_product(name: &str, price: i64, is_sale: bool, sale_price: Option<i64>) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Yen::new(price),
        shop_id: None,
        category: Category::Other,
        is_sale,
        sale_price: sale_price.map(Yen::new),
    }
}

#[tokio::test]
async fn test_cart_add_view_remove_roundtrip() {
    let store = Arc::new(MemoryStore::new());
    let regular = store
        .create_product(new_product("にんじん", 120, false, None))
        .await
        .expect("product");
    let on_sale = store
        .create_product(new_product("豚こま", 400, true, Some(300)))
        .await
        .expect("product");

    let mut client = TestClient::new(test_app(&store));

    // Add the regular product twice, the sale product once.
    let response = client
        .request("POST", &format!("/cart/add/{}", regular.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    client
        .request("POST", &format!("/cart/add/{}", regular.id), None)
        .await;
    client
        .request("POST", &format!("/cart/add/{}", on_sale.id), None)
        .await;

    let response = client.request("GET", "/cart", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let lines = body["lines"].as_array().expect("lines");
    assert_eq!(lines.len(), 2);
    // Two entries, one with quantity 2 - not three separate lines.
    // 2 x 120 + 1 x 300 (sale price applies in the cart)
    assert_eq!(body["total"], 540);

    // Remove the regular product entirely (not a decrement).
    let response = client
        .request("POST", &format!("/cart/remove/{}", regular.id), None)
        .await;
    let body = json_body(response).await;
    assert_eq!(body["lines"].as_array().expect("lines").len(), 1);
    assert_eq!(body["total"], 300);

    // Removing a never-added id is a no-op.
    let response = client.request("POST", "/cart/remove/424242", None).await;
    let body = json_body(response).await;
    assert_eq!(body["lines"].as_array().expect("lines").len(), 1);
    assert_eq!(body["total"], 300);
}

#[tokio::test]
async fn test_cart_drops_deleted_product_silently() {
    let store = Arc::new(MemoryStore::new());
    let keep = store
        .create_product(new_product("たまご", 250, false, None))
        .await
        .expect("product");
    let gone = store
        .create_product(new_product("パン", 180, false, None))
        .await
        .expect("product");

    let mut client = TestClient::new(test_app(&store));
    client
        .request("POST", &format!("/cart/add/{}", keep.id), None)
        .await;
    client
        .request("POST", &format!("/cart/add/{}", gone.id), None)
        .await;

    store.delete_product(gone.id).await.expect("delete");

    let response = client.request("GET", "/cart", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["lines"].as_array().expect("lines").len(), 1);
    assert_eq!(body["total"], 250);
}

#[tokio::test]
async fn test_single_checkout_and_double_finalize() {
    let store = Arc::new(MemoryStore::new());
    let product = store
        .create_product(new_product("秋刀魚", 300, false, None))
        .await
        .expect("product");

    let mut client = TestClient::new(test_app(&store));

    let response = client
        .request("POST", &format!("/payments/checkout/{}", product.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["amount"], 300);
    let order_id = body["order"]["id"].as_i64().expect("order id");

    // Provider success callback.
    let response = client
        .request("POST", &format!("/payments/success/{order_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["order"]["status"], "success");
    assert_eq!(body["already_finalized"], false);
    assert!(body["notification"]
        .as_str()
        .expect("notification")
        .contains("秋刀魚"));

    // A repeat callback is a detectable no-op.
    let response = client
        .request("POST", &format!("/payments/cancel/{order_id}"), None)
        .await;
    let body = json_body(response).await;
    assert_eq!(body["order"]["status"], "success");
    assert_eq!(body["already_finalized"], true);
}

#[tokio::test]
async fn test_bundle_checkout_batch_finalize_consumes_batch() {
    let store = Arc::new(MemoryStore::new());
    let mut product_ids = Vec::new();
    for (name, price) in [("豆腐", 150), ("ねぎ", 100), ("味噌", 350)] {
        let product = store
            .create_product(new_product(name, price, false, None))
            .await
            .expect("product");
        product_ids.push(product.id);
    }
    store
        .create_set(NewProductSet {
            name: "味噌汁セット".to_string(),
            slug: Some("misoshiru".to_string()),
            price: Yen::new(500),
            description: String::new(),
            product_ids,
            is_active: true,
        })
        .await
        .expect("set");

    let mut client = TestClient::new(test_app(&store));

    let response = client
        .request("POST", "/payments/checkout-set/misoshiru", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let orders = body["orders"].as_array().expect("orders");
    assert_eq!(orders.len(), 3);
    for order in orders {
        assert_eq!(order["status"], "pending");
    }
    // Default policy: sum of the member products' own prices.
    assert_eq!(body["total"], 600);

    // Finalize the whole batch as success.
    let response = client.request("POST", "/payments/success-set", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["finalized_count"], 3);
    assert_eq!(body["total"], 600);
    for order in body["orders"].as_array().expect("orders") {
        assert_eq!(order["status"], "success");
    }

    // The batch key was consumed: a repeat call finalizes nothing.
    let response = client.request("POST", "/payments/success-set", None).await;
    let body = json_body(response).await;
    assert_eq!(body["finalized_count"], 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_checkout_missing_targets_are_404() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client.request("POST", "/payments/checkout/404", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .request("POST", "/payments/checkout-set/no-such-set", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.request("POST", "/payments/success/404", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_amount_is_snapshotted_at_checkout() {
    let store = Arc::new(MemoryStore::new());
    let product = store
        .create_product(new_product("特売きゅうり", 100, true, Some(80)))
        .await
        .expect("product");

    let mut client = TestClient::new(test_app(&store));
    let response = client
        .request("POST", &format!("/payments/checkout/{}", product.id), None)
        .await;
    let body = json_body(response).await;
    // Checkout snapshots the base price, not the sale price.
    assert_eq!(body["order"]["amount"], 100);
}
