//! Home page aggregate.

use axum::{Json, extract::State};
use chrono::Local;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::routes::events::EventView;
use crate::routes::products::ProductView;
use crate::routes::sets::SetView;
use crate::services::events::{EventFilter, spot_events};
use crate::state::AppState;

const SALE_PICKS: usize = 8;
const RECOMMENDED_SETS: usize = 3;
const UPCOMING_EVENTS: usize = 4;

/// Home page data: sale picks, recommended sets, upcoming events.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub sale_products: Vec<ProductView>,
    pub recommended_sets: Vec<SetView>,
    pub upcoming_events: Vec<EventView>,
}

/// Home aggregate.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let today = Local::now().date_naive();

    let mut sale_products = state.catalog().sale_products().await?;
    sale_products.truncate(SALE_PICKS);

    let mut sets = state.catalog().list_sets().await?;
    sets.truncate(RECOMMENDED_SETS);

    let events = state.catalog().list_events().await?;
    let mut upcoming = spot_events(&events, today, &EventFilter::default());
    upcoming.truncate(UPCOMING_EVENTS);

    Ok(Json(HomeView {
        sale_products: sale_products.iter().map(ProductView::from).collect(),
        recommended_sets: sets.iter().map(SetView::from).collect(),
        upcoming_events: upcoming.iter().map(|e| EventView::new(e, today)).collect(),
    }))
}
