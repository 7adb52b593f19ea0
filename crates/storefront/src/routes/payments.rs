//! Checkout and payment route handlers.
//!
//! Order creation and finalization are separate requests: the finalize
//! endpoints simulate a payment provider's success/cancel callbacks. Bundle
//! checkouts stash their order ids in the session so success-set/cancel-set
//! can resolve the whole batch at once; that batch key is consumed on first
//! read, so a repeat call finalizes nothing.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use machikado_core::{OrderId, PaymentOutcome, ProductId, Yen};

use crate::error::Result;
use crate::models::{Order, session::keys};
use crate::routes::products::ProductView;
use crate::routes::sets::SetView;
use crate::services::checkout::CheckoutService;
use crate::services::notify;
use crate::state::AppState;

/// Single-product checkout confirmation.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub product: ProductView,
    pub order: Order,
}

/// Bundle checkout confirmation.
#[derive(Debug, Serialize)]
pub struct SetCheckoutView {
    pub set: SetView,
    pub products: Vec<ProductView>,
    pub orders: Vec<Order>,
    /// Displayed total, per the configured bundle total policy.
    pub total: Yen,
}

/// Single-order finalize confirmation.
#[derive(Debug, Serialize)]
pub struct FinalizeView {
    pub order: Order,
    /// True when the order was already terminal and nothing changed.
    pub already_finalized: bool,
    /// The composed (not dispatched) notification line.
    pub notification: String,
}

/// Batch finalize confirmation.
#[derive(Debug, Serialize)]
pub struct BatchFinalizeView {
    pub orders: Vec<Order>,
    pub total: Yen,
    pub finalized_count: usize,
}

/// Create one pending order for a product.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<CheckoutView>> {
    let service = CheckoutService::new(state.catalog(), state.orders());
    let confirmation = service.checkout_product(ProductId::new(product_id)).await?;

    tracing::info!(
        order_id = %confirmation.order.id,
        product_id = %confirmation.product.id,
        amount = %confirmation.order.amount,
        "checkout created pending order"
    );

    Ok(Json(CheckoutView {
        product: ProductView::from(&confirmation.product),
        order: confirmation.order,
    }))
}

/// Create one pending order per member product of a set and stash the batch
/// in the session.
#[instrument(skip(state, session))]
pub async fn checkout_set(
    State(state): State<AppState>,
    session: Session,
    Path(set_slug): Path<String>,
) -> Result<Json<SetCheckoutView>> {
    let service = CheckoutService::new(state.catalog(), state.orders());
    let confirmation = service
        .checkout_set(&set_slug, state.config().bundle_total_policy)
        .await?;

    let order_ids: Vec<OrderId> = confirmation.orders.iter().map(|o| o.id).collect();
    session.insert(keys::SET_ORDER_IDS, &order_ids).await?;

    tracing::info!(
        set = %confirmation.set.slug,
        orders = order_ids.len(),
        total = %confirmation.total,
        "bundle checkout created pending orders"
    );

    Ok(Json(SetCheckoutView {
        set: SetView::from(&confirmation.set),
        products: confirmation.products.iter().map(ProductView::from).collect(),
        orders: confirmation.orders,
        total: confirmation.total,
    }))
}

/// Finalize one order with the given outcome.
async fn finalize_one(
    state: &AppState,
    order_id: i32,
    outcome: PaymentOutcome,
) -> Result<Json<FinalizeView>> {
    let service = CheckoutService::new(state.catalog(), state.orders());
    let result = service
        .finalize_order(OrderId::new(order_id), outcome)
        .await?;

    if result.already_finalized {
        tracing::warn!(
            order_id = %result.order.id,
            status = %result.order.status,
            "finalize repeated on terminal order; no change"
        );
    }

    let product_name = state
        .catalog()
        .product(result.order.product_id)
        .await?
        .map_or_else(|| "(不明)".to_string(), |p| p.name);
    let notification = notify::order_notification(&result.order, &product_name, outcome);

    Ok(Json(FinalizeView {
        order: result.order,
        already_finalized: result.already_finalized,
        notification,
    }))
}

/// Payment provider success callback for one order.
#[instrument(skip(state))]
pub async fn success(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<FinalizeView>> {
    finalize_one(&state, order_id, PaymentOutcome::Success).await
}

/// Payment provider cancel callback for one order.
#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<FinalizeView>> {
    finalize_one(&state, order_id, PaymentOutcome::Cancel).await
}

/// Finalize the session batch with the given outcome.
///
/// Pops the batch key first; once consumed, a repeat call finds an empty
/// batch and reports zero orders and a zero total.
async fn finalize_batch(
    state: &AppState,
    session: &Session,
    outcome: PaymentOutcome,
) -> Result<Json<BatchFinalizeView>> {
    let order_ids: Vec<OrderId> = session
        .remove(keys::SET_ORDER_IDS)
        .await?
        .unwrap_or_default();

    let service = CheckoutService::new(state.catalog(), state.orders());
    let result = service.finalize_batch(&order_ids, outcome).await?;

    tracing::info!(
        finalized = result.orders.len(),
        total = %result.total,
        outcome = %outcome,
        "batch finalize"
    );

    Ok(Json(BatchFinalizeView {
        finalized_count: result.orders.len(),
        total: result.total,
        orders: result.orders,
    }))
}

/// Payment provider success callback for the session batch.
#[instrument(skip(state, session))]
pub async fn success_set(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<BatchFinalizeView>> {
    finalize_batch(&state, &session, PaymentOutcome::Success).await
}

/// Payment provider cancel callback for the session batch.
#[instrument(skip(state, session))]
pub async fn cancel_set(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<BatchFinalizeView>> {
    finalize_batch(&state, &session, PaymentOutcome::Cancel).await
}
