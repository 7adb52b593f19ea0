//! Data stores for the storefront.
//!
//! Two seams, injected into [`crate::state::AppState`] as trait objects so
//! tests can swap the `PostgreSQL` implementations for the in-memory one:
//!
//! - [`CatalogStore`] - read-mostly catalog queries (streets, shops,
//!   products, sets, events) plus the write paths used by seeding and the
//!   event registration endpoint.
//! - [`OrderStore`] - the order ledger: create pending orders and move them
//!   through the `pending -> success | cancel` lifecycle.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p machikado-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use machikado_core::{Category, OrderId, PaymentOutcome, ProductId, SetId, ShopId, StreetId, Yen};

use crate::models::{
    Event, NewEvent, NewProduct, NewProductSet, NewShop, NewStreet, Order, Product, ProductSet,
    Shop, Street,
};

pub use memory::MemoryStore;
pub use postgres::{PgCatalogStore, PgOrderStore};

/// Errors that can occur in repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a product still referenced by orders).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Result of a finalize action on a single order.
#[derive(Debug, Clone)]
pub struct FinalizeResult {
    /// The order after the action.
    pub order: Order,
    /// True when the order was already terminal; the stored status was left
    /// unchanged and the action was a no-op.
    pub already_finalized: bool,
}

/// Read-mostly catalog queries plus the write paths used by seeding and
/// event registration.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Streets ---
    async fn list_streets(&self) -> Result<Vec<Street>, RepositoryError>;
    async fn street_by_slug(&self, slug: &str) -> Result<Option<Street>, RepositoryError>;

    // --- Shops ---
    async fn list_shops(&self, category: Option<Category>) -> Result<Vec<Shop>, RepositoryError>;
    async fn shop(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError>;
    async fn shops_by_street(&self, street_id: StreetId) -> Result<Vec<Shop>, RepositoryError>;
    /// First shop with exactly this name (case-sensitive).
    async fn shop_by_name(&self, name: &str) -> Result<Option<Shop>, RepositoryError>;

    // --- Products ---
    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Product>, RepositoryError>;
    async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
    async fn products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError>;
    async fn sale_products(&self) -> Result<Vec<Product>, RepositoryError>;

    // --- Sets ---
    async fn list_sets(&self) -> Result<Vec<ProductSet>, RepositoryError>;
    async fn set_by_slug(&self, slug: &str) -> Result<Option<ProductSet>, RepositoryError>;
    async fn set_products(&self, set_id: SetId) -> Result<Vec<Product>, RepositoryError>;

    // --- Events ---
    async fn list_events(&self) -> Result<Vec<Event>, RepositoryError>;
    async fn event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError>;

    // --- Writes (seeding, event registration) ---
    async fn create_street(&self, street: NewStreet) -> Result<Street, RepositoryError>;
    async fn create_shop(&self, shop: NewShop) -> Result<Shop, RepositoryError>;
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError>;
    async fn create_set(&self, set: NewProductSet) -> Result<ProductSet, RepositoryError>;
    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError>;

    /// Delete a product.
    ///
    /// Rejected with [`RepositoryError::Conflict`] while any order still
    /// references it - orders must never dangle.
    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError>;
}

/// The order ledger.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Create an order in `pending` with the given snapshot amount.
    async fn create(&self, product_id: ProductId, amount: Yen) -> Result<Order, RepositoryError>;

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Move one order to a terminal status.
    ///
    /// A repeat finalize on an already-terminal order is a detectable no-op:
    /// the stored status is left unchanged and the result reports
    /// `already_finalized`.
    async fn finalize(
        &self,
        id: OrderId,
        outcome: PaymentOutcome,
    ) -> Result<FinalizeResult, RepositoryError>;

    /// Bulk-update all matching orders to the outcome status and return them.
    async fn finalize_batch(
        &self,
        ids: &[OrderId],
        outcome: PaymentOutcome,
    ) -> Result<Vec<Order>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
