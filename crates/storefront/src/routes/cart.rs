//! Cart route handlers.
//!
//! The cart map lives in the visitor's session; add/remove mutate it and
//! return the freshly resolved contents, viewing never mutates it.

use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{CartMap, session::keys};
use crate::services::cart::{self, CartContents};
use crate::state::AppState;

/// Get the cart map from the session (empty when absent).
async fn get_cart(session: &Session) -> Result<CartMap> {
    Ok(session.get::<CartMap>(keys::CART).await?.unwrap_or_default())
}

/// Save the cart map back to the session.
async fn set_cart(session: &Session, cart: &CartMap) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Resolved cart contents and total.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartContents>> {
    let cart = get_cart(&session).await?;
    let contents = cart::view_cart(state.catalog(), &cart).await?;
    Ok(Json(contents))
}

/// Add one unit of a product to the cart.
///
/// The product is not validated here; a stale key is dropped at view time.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Json<CartContents>> {
    let mut cart = get_cart(&session).await?;
    cart::add_item(&mut cart, &product_id.to_string());
    set_cart(&session, &cart).await?;

    let contents = cart::view_cart(state.catalog(), &cart).await?;
    Ok(Json(contents))
}

/// Remove a product line from the cart entirely.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Json<CartContents>> {
    let mut cart = get_cart(&session).await?;
    if cart::remove_item(&mut cart, &product_id.to_string()) {
        set_cart(&session, &cart).await?;
    }

    let contents = cart::view_cart(state.catalog(), &cart).await?;
    Ok(Json(contents))
}
