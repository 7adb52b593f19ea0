//! Integration tests for event listings and the consult router.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed data applied
//! - The storefront server running (cargo run -p machikado-storefront)
//!
//! Run with: cargo test -p machikado-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use machikado_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_event_listing_splits_regular_and_spot() {
    let client = session_client();
    let base_url = storefront_base_url();

    let events: Value = client
        .get(format!("{base_url}/events"))
        .send()
        .await
        .expect("Failed to list events")
        .json()
        .await
        .expect("Failed to parse events");

    assert!(events["regular"].is_array());
    assert!(events["spot"].is_array());
    // Seeded regular event is inside its (open) announce window.
    assert!(!events["regular"].as_array().expect("regular").is_empty());
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_spot_event_without_start_date_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/events"))
        .json(&serde_json::json!({
            "title": "undated spot event",
            "is_regular": false
        }))
        .send()
        .await
        .expect("Failed to post event");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["field"], "start_date");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_consult_preset_routes_to_seeded_shop() {
    let client = session_client();
    let base_url = storefront_base_url();

    let consult: Value = client
        .get(format!("{base_url}/consult?preset=bbq"))
        .send()
        .await
        .expect("Failed to consult")
        .json()
        .await
        .expect("Failed to parse consult");

    // The seed data ships the mapped shop, so this routes instead of
    // falling back to the menu.
    assert_eq!(consult["shop"]["name"], "肉のマルフク");
    assert!(consult["message"].as_str().expect("message").contains("こんにちは"));
}
