//! Consult route handlers.
//!
//! `GET /consult?preset=bbq` routes the visitor to the mapped shop with a
//! pre-filled consultation message; an unmapped key (or a mapped key whose
//! shop is missing from the catalog) falls through to the preset menu
//! instead of erroring.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use machikado_core::ShopId;

use crate::error::{AppError, Result};
use crate::routes::shops::ShopView;
use crate::services::consult::{self, ConsultContext, ConsultPreset};
use crate::state::AppState;

/// Query parameters for the consult entry point.
#[derive(Debug, Deserialize)]
pub struct ConsultQuery {
    pub preset: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub set: Option<String>,
    pub order: Option<i32>,
    pub note: Option<String>,
}

impl ConsultQuery {
    fn context(&self) -> ConsultContext {
        ConsultContext {
            product: self.product.clone(),
            quantity: self.quantity,
            set: self.set.clone(),
            order: self.order,
            note: self.note.clone(),
        }
    }
}

/// A routed consultation: the target shop and the composed message.
#[derive(Debug, Serialize)]
pub struct ConsultComposeView {
    pub shop: ShopView,
    pub preset: &'static ConsultPreset,
    pub message: String,
}

/// The generic preset-selection menu.
#[derive(Debug, Serialize)]
pub struct ConsultMenuView {
    pub presets: &'static [ConsultPreset],
}

/// A direct shop consultation (no preset).
#[derive(Debug, Serialize)]
pub struct ShopConsultView {
    pub shop: ShopView,
    pub message: String,
}

/// Consult entry point.
///
/// With a resolvable preset key, responds with the routed shop and composed
/// message; otherwise with the preset menu.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<ConsultQuery>,
) -> Result<Response> {
    if let Some(key) = query.preset.as_deref()
        && let Some((preset, shop)) = consult::resolve_preset_shop(state.catalog(), key).await?
    {
        let message = consult::compose_message(&shop.name, Some(preset), &query.context());
        return Ok(Json(ConsultComposeView {
            shop: ShopView::from(&shop),
            preset,
            message,
        })
        .into_response());
    }

    Ok(Json(ConsultMenuView {
        presets: consult::PRESETS,
    })
    .into_response())
}

/// Direct consultation with a specific shop.
#[instrument(skip(state))]
pub async fn shop_consult(
    State(state): State<AppState>,
    Path(shop_id): Path<i32>,
    Query(query): Query<ConsultQuery>,
) -> Result<Json<ShopConsultView>> {
    let shop = state
        .catalog()
        .shop(ShopId::new(shop_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {shop_id}")))?;

    let message = consult::compose_message(&shop.name, None, &query.context());

    Ok(Json(ShopConsultView {
        shop: ShopView::from(&shop),
        message,
    }))
}
