//! In-process tests for event registration and listings.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use serde_json::json;

use machikado_storefront::db::MemoryStore;

use common::{TestClient, json_body, test_app};

#[tokio::test]
async fn test_spot_event_without_start_date_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "ナイト屋台",
                "category": "night",
                "is_regular": false
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["field"], "start_date");
}

#[tokio::test]
async fn test_regular_event_without_dates_is_accepted() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "Saturday Morning Market",
                "category": "food",
                "is_regular": true,
                "schedule_text": "毎週土曜 7:00〜"
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    // Slug derived from the title.
    assert_eq!(body["slug"], "saturday-morning-market");
    assert_eq!(body["is_upcoming"], true);
    assert_eq!(body["display_date_text"], "毎週土曜 7:00〜");
}

#[tokio::test]
async fn test_event_listings_split_and_filter() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));
    let today = Local::now().date_naive();

    // One regular event inside its announce window.
    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "朝市",
                "category": "food",
                "is_regular": true,
                "schedule_text": "毎週土曜 7:00〜",
                "announce_from": (today - Duration::days(3)).to_string(),
                "announce_until": (today + Duration::days(3)).to_string()
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // One regular event whose announce window already closed.
    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "終了した告知",
                "category": "season",
                "is_regular": true,
                "announce_until": (today - Duration::days(1)).to_string()
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // One upcoming spot event and one that has already ended.
    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "ナイト屋台",
                "category": "night",
                "start_date": (today + Duration::days(5)).to_string(),
                "end_date": (today + Duration::days(7)).to_string(),
                "location": "中央広場"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "先週の特売",
                "category": "sale",
                "start_date": (today - Duration::days(9)).to_string(),
                "end_date": (today - Duration::days(7)).to_string()
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Unfiltered listing: one regular, one spot.
    let response = client.request("GET", "/events", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["regular"].as_array().expect("regular").len(), 1);
    assert_eq!(body["regular"][0]["title"], "朝市");
    assert_eq!(body["spot"].as_array().expect("spot").len(), 1);
    assert_eq!(body["spot"][0]["title"], "ナイト屋台");

    // Category filter.
    let response = client.request("GET", "/events?category=night", None).await;
    let body = json_body(response).await;
    assert!(body["regular"].as_array().expect("regular").is_empty());
    assert_eq!(body["spot"].as_array().expect("spot").len(), 1);

    // Free-text filter hits the location field.
    let response = client
        .request("GET", "/events?q=%E5%BA%83%E5%A0%B4", None)
        .await;
    let body = json_body(response).await;
    assert_eq!(body["spot"].as_array().expect("spot").len(), 1);

    // Unknown category tag matches nothing.
    let response = client.request("GET", "/events?category=circus", None).await;
    let body = json_body(response).await;
    assert!(body["regular"].as_array().expect("regular").is_empty());
    assert!(body["spot"].as_array().expect("spot").is_empty());
}

#[tokio::test]
async fn test_event_detail_by_slug() {
    let store = Arc::new(MemoryStore::new());
    let mut client = TestClient::new(test_app(&store));

    let response = client
        .request(
            "POST",
            "/events",
            Some(json!({
                "title": "Tasting Relay",
                "slug": "tasting-relay",
                "category": "tasting",
                "is_regular": true,
                "body": "各店の自慢を少しずつ。"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client.request("GET", "/events/tasting-relay", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Tasting Relay");
    assert_eq!(body["body"], "各店の自慢を少しずつ。");

    let response = client.request("GET", "/events/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
