//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use machikado_core::{Category, ProductId, ShopId, Yen};

use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: Yen,
    pub is_sale: bool,
    pub sale_price: Option<Yen>,
    /// The price a buyer pays right now.
    pub effective_price: Yen,
    pub shop_id: Option<ShopId>,
    pub category: Category,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            is_sale: product.is_sale,
            sale_price: product.sale_price,
            effective_price: product.effective_price(),
            shop_id: product.shop_id,
            category: product.category,
        }
    }
}

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Parse an optional category tag.
///
/// An unknown tag filters everything out (empty listing) rather than
/// erroring, matching the lenient listing behavior of the original site.
pub(crate) fn parse_category(raw: Option<&str>) -> std::result::Result<Option<Category>, ()> {
    match raw.filter(|s| !s.is_empty()) {
        Some(tag) => tag.parse().map(Some).map_err(|_| ()),
        None => Ok(None),
    }
}

/// Product listing, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let Ok(category) = parse_category(query.category.as_deref()) else {
        return Ok(Json(Vec::new()));
    };
    let products = state.catalog().list_products(category).await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductView>> {
    let product = state
        .catalog()
        .product(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(ProductView::from(&product)))
}

/// Products currently flagged for sale, newest first.
#[instrument(skip(state))]
pub async fn sale(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let products = state.catalog().sale_products().await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}
