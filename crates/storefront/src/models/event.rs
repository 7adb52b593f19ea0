//! Event model and write-time validation.
//!
//! Events come in two disjoint kinds, distinguished by `is_regular`:
//!
//! - **Regular** events recur (e.g. "毎週金曜 17:00〜") and are shown based
//!   on an announcement window rather than a date range.
//! - **Spot** events are dated, one-off or time-bounded, and must carry a
//!   start date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use machikado_core::{EventCategory, EventId, slugify};

/// Fallback display label for a regular event with no schedule text.
pub const REGULAR_EVENT_LABEL: &str = "定番イベント";

/// A district event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Unique URL slug, derived from the title when not given explicitly.
    pub slug: String,
    pub category: EventCategory,
    /// Recurring event shown year-round (subject to the announce window).
    pub is_regular: bool,
    /// Free-form recurrence description; only meaningful when regular.
    pub schedule_text: String,
    /// Required unless the event is regular.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub summary: String,
    pub body: String,
    pub location: String,
    /// Show no earlier than this date (immediately when absent).
    pub announce_from: Option<NaiveDate>,
    /// Show no later than this date (indefinitely when absent).
    pub announce_until: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event spans more than one day.
    #[must_use]
    pub fn is_multi_day(&self) -> bool {
        let Some(start) = self.start_date else {
            return false;
        };
        self.end_date.is_some_and(|end| end > start)
    }

    /// Whether the event is still worth showing as upcoming on `today`.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        if self.is_regular {
            return true;
        }
        let Some(start) = self.start_date else {
            return false;
        };
        self.end_date.unwrap_or(start) >= today
    }

    /// Human-readable date line for listings.
    #[must_use]
    pub fn display_date_text(&self) -> String {
        if self.is_regular {
            if self.schedule_text.is_empty() {
                return REGULAR_EVENT_LABEL.to_string();
            }
            return self.schedule_text.clone();
        }
        let Some(start) = self.start_date else {
            return String::new();
        };
        match self.end_date {
            Some(end) if end > start => format!("{start} 〜 {end}"),
            _ => start.to_string(),
        }
    }
}

/// Field-attributed validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Data for inserting an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub is_regular: bool,
    #[serde(default)]
    pub schedule_text: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub announce_from: Option<NaiveDate>,
    #[serde(default)]
    pub announce_until: Option<NaiveDate>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl NewEvent {
    /// Validate write-time invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming `start_date` when a spot
    /// (non-regular) event has no start date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_regular && self.start_date.is_none() {
            return Err(ValidationError {
                field: "start_date",
                message: "スポット（期間/単発）のイベントは開始日が必要です。".to_string(),
            });
        }
        Ok(())
    }

    /// The slug this event will be stored under.
    #[must_use]
    pub fn resolved_slug(&self) -> String {
        self.slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&self.title))
    }
}
