//! Event visibility rules.
//!
//! Active events split into two disjoint listings by `is_regular`:
//!
//! - Regular events are shown while inside their announce window and ordered
//!   featured-first, then by category, then by title.
//! - Spot events are shown while still ongoing (or starting today-or-later)
//!   and ordered by start date, featured-first as tie-break.
//!
//! Both listings accept the same optional filters: a category tag and a
//! case-insensitive free-text query matched against title, summary, body,
//! location, and schedule text (a hit in any field includes the event).

use chrono::NaiveDate;

use machikado_core::EventCategory;

use crate::models::Event;

/// Optional listing filters, applied identically to both event kinds.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub query: Option<String>,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        if let Some(category) = self.category
            && event.category != category
        {
            return false;
        }
        if let Some(query) = self.query.as_deref()
            && !query.trim().is_empty()
            && !matches_query(event, query)
        {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match across the event's text fields.
fn matches_query(event: &Event, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    [
        &event.title,
        &event.summary,
        &event.body,
        &event.location,
        &event.schedule_text,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether a regular event's announce window covers `today`.
fn announce_window_open(event: &Event, today: NaiveDate) -> bool {
    event.announce_from.is_none_or(|from| from <= today)
        && event.announce_until.is_none_or(|until| until >= today)
}

/// Whether a spot event is still ongoing or starts today-or-later.
fn spot_visible(event: &Event, today: NaiveDate) -> bool {
    match (event.start_date, event.end_date) {
        (_, Some(end)) => end >= today,
        (Some(start), None) => start >= today,
        (None, None) => false,
    }
}

/// The regular (recurring) events listing.
#[must_use]
pub fn regular_events(events: &[Event], today: NaiveDate, filter: &EventFilter) -> Vec<Event> {
    let mut selected: Vec<Event> = events
        .iter()
        .filter(|e| e.is_regular && announce_window_open(e, today) && filter.matches(e))
        .cloned()
        .collect();
    // Featured first, then category, then title.
    selected.sort_by(|a, b| {
        (!a.is_featured, a.category, &a.title).cmp(&(!b.is_featured, b.category, &b.title))
    });
    selected
}

/// The spot (dated) events listing.
#[must_use]
pub fn spot_events(events: &[Event], today: NaiveDate, filter: &EventFilter) -> Vec<Event> {
    let mut selected: Vec<Event> = events
        .iter()
        .filter(|e| !e.is_regular && spot_visible(e, today) && filter.matches(e))
        .cloned()
        .collect();
    // Start date ascending (absent dates last), featured first as tie-break.
    selected.sort_by(|a, b| {
        (a.start_date.is_none(), a.start_date, !a.is_featured, &a.title).cmp(&(
            b.start_date.is_none(),
            b.start_date,
            !b.is_featured,
            &b.title,
        ))
    });
    selected
}
