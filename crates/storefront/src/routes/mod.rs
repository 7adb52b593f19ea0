//! HTTP route handlers for the storefront.
//!
//! Handlers return JSON views; page rendering is out of scope for this core.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home aggregate (sale picks, sets, upcoming events)
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store connectivity)
//!
//! # Catalog
//! GET  /streets                 - Street listing
//! GET  /streets/{slug}/shops    - Shops on a street
//! GET  /shops?category=         - Shop listing (optional category filter)
//! GET  /shops/{id}              - Shop detail with its products
//! GET  /products?category=      - Product listing (optional category filter)
//! GET  /products/{id}           - Product detail
//! GET  /sale                    - Products currently on sale
//! GET  /sets                    - Active sets, newest first
//! GET  /sets/{slug}             - Set detail with member products
//!
//! # Events
//! GET  /events?category=&q=     - Regular + spot listings (filtered)
//! POST /events                  - Register an event (validated)
//! GET  /events/{slug}           - Event detail
//!
//! # Cart (session-backed)
//! GET  /cart                    - Resolved cart contents and total
//! POST /cart/add/{product_id}   - Increment quantity by 1
//! POST /cart/remove/{product_id}- Drop the line entirely
//!
//! # Checkout & payments (simulated provider callbacks)
//! POST /payments/checkout/{product_id}    - Create one pending order
//! POST /payments/checkout-set/{set_slug}  - Create one pending order per member
//! POST /payments/success/{order_id}       - Finalize one order to success
//! POST /payments/cancel/{order_id}        - Finalize one order to cancel
//! POST /payments/success-set              - Finalize the session batch to success
//! POST /payments/cancel-set               - Finalize the session batch to cancel
//!
//! # Orders
//! GET  /orders                  - Order list, newest first
//! GET  /orders/{id}             - Order detail with product and shop
//!
//! # Consult
//! GET  /consult?preset=...      - Preset routing + composed message (or the menu)
//! GET  /consult/shops/{shop_id} - Direct shop consultation
//! ```

pub mod cart;
pub mod consult;
pub mod events;
pub mod health;
pub mod home;
pub mod orders;
pub mod payments;
pub mod products;
pub mod sets;
pub mod shops;
pub mod streets;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the street routes router.
pub fn street_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(streets::index))
        .route("/{slug}/shops", get(streets::shops))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shops::index))
        .route("/{id}", get(shops::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the set routes router.
pub fn set_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sets::index))
        .route("/{slug}", get(sets::show))
}

/// Create the event routes router.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(events::index).post(events::create))
        .route("/{slug}", get(events::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{product_id}", post(cart::add))
        .route("/remove/{product_id}", post(cart::remove))
}

/// Create the payments routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout/{product_id}", post(payments::checkout))
        .route("/checkout-set/{set_slug}", post(payments::checkout_set))
        .route("/success/{order_id}", post(payments::success))
        .route("/cancel/{order_id}", post(payments::cancel))
        .route("/success-set", post(payments::success_set))
        .route("/cancel-set", post(payments::cancel_set))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the consult routes router.
pub fn consult_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(consult::home))
        .route("/shops/{shop_id}", get(consult::shop_consult))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .nest("/streets", street_routes())
        .nest("/shops", shop_routes())
        .nest("/products", product_routes())
        .route("/sale", get(products::sale))
        .nest("/sets", set_routes())
        // Event routes
        .nest("/events", event_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout & payment routes
        .nest("/payments", payment_routes())
        // Order routes
        .nest("/orders", order_routes())
        // Consult routes
        .nest("/consult", consult_routes())
}
