//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use machikado_core::OrderId;

use crate::error::{AppError, Result};
use crate::models::Order;
use crate::routes::products::ProductView;
use crate::routes::shops::ShopView;
use crate::state::AppState;

/// Order list line with its product resolved for display.
#[derive(Debug, Serialize)]
pub struct OrderListItemView {
    pub order: Order,
    /// Absent only if the product row disappeared out from under us.
    pub product: Option<ProductView>,
}

/// Order detail with product and shop context.
#[derive(Debug, Serialize)]
pub struct OrderDetailView {
    pub order: Order,
    pub product: Option<ProductView>,
    pub shop: Option<ShopView>,
}

/// Order list, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrderListItemView>>> {
    let orders = state.orders().list().await?;

    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let product = state.catalog().product(order.product_id).await?;
        items.push(OrderListItemView {
            product: product.as_ref().map(ProductView::from),
            order,
        });
    }
    Ok(Json(items))
}

/// Order detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetailView>> {
    let order = state
        .orders()
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let product = state.catalog().product(order.product_id).await?;
    let shop = match product.as_ref().and_then(|p| p.shop_id) {
        Some(shop_id) => state.catalog().shop(shop_id).await?,
        None => None,
    };

    Ok(Json(OrderDetailView {
        order,
        product: product.as_ref().map(ProductView::from),
        shop: shop.as_ref().map(ShopView::from),
    }))
}
