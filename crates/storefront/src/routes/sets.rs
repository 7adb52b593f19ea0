//! Set (meal bundle) route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use machikado_core::{SetId, Yen};

use crate::error::{AppError, Result};
use crate::models::ProductSet;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Set display data.
#[derive(Debug, Clone, Serialize)]
pub struct SetView {
    pub id: SetId,
    pub name: String,
    pub slug: String,
    pub price: Yen,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ProductSet> for SetView {
    fn from(set: &ProductSet) -> Self {
        Self {
            id: set.id,
            name: set.name.clone(),
            slug: set.slug.clone(),
            price: set.price,
            description: set.description.clone(),
            created_at: set.created_at,
        }
    }
}

/// Set detail with member products.
#[derive(Debug, Serialize)]
pub struct SetDetailView {
    pub set: SetView,
    pub products: Vec<ProductView>,
}

/// Active sets, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<SetView>>> {
    let sets = state.catalog().list_sets().await?;
    Ok(Json(sets.iter().map(SetView::from).collect()))
}

/// Active set detail, by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SetDetailView>> {
    let set = state
        .catalog()
        .set_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("set '{slug}'")))?;
    let products = state.catalog().set_products(set.id).await?;
    Ok(Json(SetDetailView {
        set: SetView::from(&set),
        products: products.iter().map(ProductView::from).collect(),
    }))
}
