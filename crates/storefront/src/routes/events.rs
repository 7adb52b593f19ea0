//! Event route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use machikado_core::{EventCategory, EventId};

use crate::error::{AppError, Result};
use crate::models::{Event, NewEvent};
use crate::services::events::{EventFilter, regular_events, spot_events};
use crate::state::AppState;

/// Event display data with the derived presentation fields.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: EventId,
    pub title: String,
    pub slug: String,
    pub category: EventCategory,
    pub is_regular: bool,
    pub schedule_text: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub summary: String,
    pub location: String,
    pub is_featured: bool,
    pub is_multi_day: bool,
    pub is_upcoming: bool,
    pub display_date_text: String,
}

impl EventView {
    /// Project an event for display as of `today`.
    #[must_use]
    pub fn new(event: &Event, today: NaiveDate) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            slug: event.slug.clone(),
            category: event.category,
            is_regular: event.is_regular,
            schedule_text: event.schedule_text.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            summary: event.summary.clone(),
            location: event.location.clone(),
            is_featured: event.is_featured,
            is_multi_day: event.is_multi_day(),
            is_upcoming: event.is_upcoming(today),
            display_date_text: event.display_date_text(),
        }
    }
}

/// Event detail display data (adds the body).
#[derive(Debug, Serialize)]
pub struct EventDetailView {
    #[serde(flatten)]
    pub event: EventView,
    pub body: String,
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    /// Category tag equality filter.
    pub category: Option<String>,
    /// Case-insensitive free-text filter.
    pub q: Option<String>,
}

/// The two event listings, filtered identically.
#[derive(Debug, Serialize)]
pub struct EventListView {
    pub regular: Vec<EventView>,
    pub spot: Vec<EventView>,
}

/// Event listings (regular and spot), with optional filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListView>> {
    let today = Local::now().date_naive();

    // An unknown category tag matches nothing rather than erroring.
    let category = match query.category.as_deref().filter(|s| !s.is_empty()) {
        Some(tag) => match tag.parse::<EventCategory>() {
            Ok(category) => Some(category),
            Err(_) => {
                return Ok(Json(EventListView {
                    regular: Vec::new(),
                    spot: Vec::new(),
                }));
            }
        },
        None => None,
    };

    let filter = EventFilter {
        category,
        query: query.q,
    };

    let events = state.catalog().list_events().await?;
    let regular = regular_events(&events, today, &filter);
    let spot = spot_events(&events, today, &filter);

    Ok(Json(EventListView {
        regular: regular.iter().map(|e| EventView::new(e, today)).collect(),
        spot: spot.iter().map(|e| EventView::new(e, today)).collect(),
    }))
}

/// Active event detail, by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetailView>> {
    let today = Local::now().date_naive();
    let event = state
        .catalog()
        .event_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{slug}'")))?;
    Ok(Json(EventDetailView {
        event: EventView::new(&event, today),
        body: event.body.clone(),
    }))
}

/// Register an event.
///
/// A spot (non-regular) event without a start date is rejected with a
/// field-attributed validation failure.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewEvent>,
) -> Result<(StatusCode, Json<EventView>)> {
    payload.validate()?;

    let today = Local::now().date_naive();
    let event = state.catalog().create_event(payload).await?;
    Ok((StatusCode::CREATED, Json(EventView::new(&event, today))))
}
