//! Checkout orchestration.
//!
//! A checkout attempt moves through `initiated -> pending-orders-created ->
//! finalized(success | cancel)`. Order creation and finalization are separate,
//! explicitly invoked steps: finalize simulates a payment provider's callback
//! and never fires automatically.

use machikado_core::{OrderId, PaymentOutcome, ProductId, Yen};

use crate::config::BundleTotalPolicy;
use crate::db::{CatalogStore, FinalizeResult, OrderStore, RepositoryError};
use crate::models::{Order, Product, ProductSet};

/// Errors from the checkout flows.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Store failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Referenced product does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Referenced set does not exist or is inactive.
    #[error("set '{0}' not found")]
    SetNotFound(String),

    /// Referenced order does not exist.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
}

/// A single-product checkout confirmation.
#[derive(Debug, Clone)]
pub struct ProductCheckout {
    pub product: Product,
    pub order: Order,
}

/// A bundle checkout confirmation.
#[derive(Debug, Clone)]
pub struct SetCheckout {
    pub set: ProductSet,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    /// Displayed total, per the configured [`BundleTotalPolicy`].
    pub total: Yen,
}

/// A batch finalize result.
#[derive(Debug, Clone)]
pub struct BatchFinalize {
    pub orders: Vec<Order>,
    pub total: Yen,
}

/// Checkout orchestrator over the catalog and the order ledger.
pub struct CheckoutService<'a> {
    catalog: &'a dyn CatalogStore,
    orders: &'a dyn OrderStore,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(catalog: &'a dyn CatalogStore, orders: &'a dyn OrderStore) -> Self {
        Self { catalog, orders }
    }

    /// Create one pending order for a single product.
    ///
    /// The snapshot amount is the product's base price; the sale price is
    /// deliberately not applied here (source behavior preserved).
    ///
    /// # Errors
    ///
    /// `ProductNotFound` when the product does not exist; store errors
    /// otherwise.
    pub async fn checkout_product(
        &self,
        product_id: ProductId,
    ) -> Result<ProductCheckout, CheckoutError> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(product_id))?;

        let order = self.orders.create(product.id, product.price).await?;

        Ok(ProductCheckout { product, order })
    }

    /// Create one pending order per member product of a set.
    ///
    /// Each order snapshots that product's own base price, not a share of
    /// the set price. The caller is responsible for stashing the returned
    /// order ids in the session batch. Partially created orders are not
    /// rolled back if a later creation fails.
    ///
    /// # Errors
    ///
    /// `SetNotFound` when no active set has this slug; store errors
    /// otherwise.
    pub async fn checkout_set(
        &self,
        slug: &str,
        policy: BundleTotalPolicy,
    ) -> Result<SetCheckout, CheckoutError> {
        let set = self
            .catalog
            .set_by_slug(slug)
            .await?
            .ok_or_else(|| CheckoutError::SetNotFound(slug.to_owned()))?;

        let products = self.catalog.set_products(set.id).await?;

        let mut orders = Vec::with_capacity(products.len());
        for product in &products {
            let order = self.orders.create(product.id, product.price).await?;
            orders.push(order);
        }

        let total = match policy {
            BundleTotalPolicy::SumOfItems => orders.iter().map(|o| o.amount).sum(),
            BundleTotalPolicy::SetPrice => set.price,
        };

        Ok(SetCheckout {
            set,
            products,
            orders,
            total,
        })
    }

    /// Finalize a single order to its terminal status.
    ///
    /// # Errors
    ///
    /// `OrderNotFound` when the order does not exist; store errors otherwise.
    pub async fn finalize_order(
        &self,
        order_id: OrderId,
        outcome: PaymentOutcome,
    ) -> Result<FinalizeResult, CheckoutError> {
        match self.orders.finalize(order_id, outcome).await {
            Ok(result) => Ok(result),
            Err(RepositoryError::NotFound) => Err(CheckoutError::OrderNotFound(order_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Bulk-finalize a consumed batch of order ids and total the result.
    ///
    /// An empty batch (a repeat call after the session key was consumed)
    /// finalizes nothing and totals zero.
    ///
    /// # Errors
    ///
    /// Store errors only.
    pub async fn finalize_batch(
        &self,
        ids: &[OrderId],
        outcome: PaymentOutcome,
    ) -> Result<BatchFinalize, CheckoutError> {
        if ids.is_empty() {
            return Ok(BatchFinalize {
                orders: Vec::new(),
                total: Yen::ZERO,
            });
        }

        let orders = self.orders.finalize_batch(ids, outcome).await?;
        let total = orders.iter().map(|o| o.amount).sum();

        Ok(BatchFinalize { orders, total })
    }
}
