//! Integration tests for Machikado.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seed
//! cargo run -p machikado-cli -- migrate
//! cargo run -p machikado-cli -- seed
//!
//! # Start the storefront
//! cargo run -p machikado-storefront
//!
//! # Run integration tests against it
//! cargo test -p machikado-integration-tests -- --ignored
//! ```
//!
//! The tests in `tests/` drive a running storefront over HTTP with a
//! cookie-holding client, so the session-backed cart and checkout batch
//! behave exactly as they do for a browser.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that holds session cookies across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
