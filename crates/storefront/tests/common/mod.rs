//! Shared helpers for in-process router tests.
//!
//! Tests drive the real router over `tower::ServiceExt::oneshot` with the
//! in-memory stores and an in-memory session store; the session cookie is
//! carried by hand between requests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};

use machikado_storefront::build_app;
use machikado_storefront::config::{BundleTotalPolicy, StorefrontConfig};
use machikado_storefront::db::MemoryStore;
use machikado_storefront::state::AppState;

/// Configuration for tests; never read from the environment.
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://unused-in-tests"),
        host: "127.0.0.1".parse().expect("addr"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("t".repeat(32)),
        bundle_total_policy: BundleTotalPolicy::SumOfItems,
        sentry_dsn: None,
    }
}

/// Build the app over a shared in-memory store.
pub fn test_app(store: &Arc<MemoryStore>) -> Router {
    let state = AppState::new(
        test_config(),
        Arc::clone(store) as Arc<dyn machikado_storefront::db::CatalogStore>,
        Arc::clone(store) as Arc<dyn machikado_storefront::db::OrderStore>,
    );
    let session_layer = SessionManagerLayer::new(SessionMemoryStore::default());
    build_app(state, session_layer)
}

/// A request/response round trip that carries a session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a request, remembering any session cookie the server sets.
    pub async fn request(&mut self, method: &str, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().expect("cookie header").to_string();
            let pair = raw.split(';').next().unwrap_or_default().to_string();
            self.cookie = Some(pair);
        }

        response
    }
}

/// Read a JSON response body.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
