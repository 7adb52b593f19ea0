//! Street route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::Street;
use crate::routes::shops::ShopView;
use crate::state::AppState;

/// Street listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Street>>> {
    let streets = state.catalog().list_streets().await?;
    Ok(Json(streets))
}

/// Shops on a street.
#[derive(Debug, Serialize)]
pub struct StreetShopsView {
    pub street: Street,
    pub shops: Vec<ShopView>,
}

/// Shops grouped under one street, by slug.
#[instrument(skip(state))]
pub async fn shops(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StreetShopsView>> {
    let street = state
        .catalog()
        .street_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("street '{slug}'")))?;
    let shops = state.catalog().shops_by_street(street.id).await?;
    Ok(Json(StreetShopsView {
        street,
        shops: shops.iter().map(ShopView::from).collect(),
    }))
}
