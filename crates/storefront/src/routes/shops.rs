//! Shop route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use machikado_core::{Category, ShopId, StreetId};

use crate::error::{AppError, Result};
use crate::models::Shop;
use crate::routes::products::{CategoryQuery, ProductView, parse_category};
use crate::state::AppState;

/// Shop display data.
#[derive(Debug, Clone, Serialize)]
pub struct ShopView {
    pub id: ShopId,
    pub street_id: StreetId,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub line_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&Shop> for ShopView {
    fn from(shop: &Shop) -> Self {
        Self {
            id: shop.id,
            street_id: shop.street_id,
            name: shop.name.clone(),
            category: shop.category,
            description: shop.description.clone(),
            line_url: shop.line_url.clone(),
            latitude: shop.latitude,
            longitude: shop.longitude,
        }
    }
}

/// Shop detail with its products.
#[derive(Debug, Serialize)]
pub struct ShopDetailView {
    pub shop: ShopView,
    pub products: Vec<ProductView>,
}

/// Shop listing, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<ShopView>>> {
    let Ok(category) = parse_category(query.category.as_deref()) else {
        return Ok(Json(Vec::new()));
    };
    let shops = state.catalog().list_shops(category).await?;
    Ok(Json(shops.iter().map(ShopView::from).collect()))
}

/// Shop detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShopDetailView>> {
    let shop = state
        .catalog()
        .shop(ShopId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;
    let products = state.catalog().products_by_shop(shop.id).await?;
    Ok(Json(ShopDetailView {
        shop: ShopView::from(&shop),
        products: products.iter().map(ProductView::from).collect(),
    }))
}
