use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::storage::keys;

use super::{require, Draft, Entity, EntityKind};

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique id.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Display date, e.g. `Oct 15, 2023`.
    pub date: String,
    /// Display time, e.g. `09:00 AM`.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Short description.
    #[serde(rename = "desc")]
    pub description: String,
}

impl Entity for Event {
    const KIND: EntityKind = EntityKind::Event;
    const SLOT: &'static str = keys::EVENTS;

    fn fallback() -> Vec<Self> {
        defaults::events()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.date = format_display_date(&self.date);
    }

    fn validate(&self) -> crate::Result<()> {
        require("title", &self.title)?;
        require("date", &self.date)?;
        require("location", &self.location)
    }
}

/// Input of the "new event" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    /// Event title (required).
    pub title: String,
    /// Date, either ISO (`2023-10-15`) or already formatted (required).
    pub date: String,
    /// Display time.
    pub time: String,
    /// Venue (required).
    pub location: String,
    /// Short description.
    pub description: String,
}

impl Draft for EventDraft {
    type Entity = Event;

    fn validate(&self) -> crate::Result<()> {
        require("title", &self.title)?;
        require("date", &self.date)?;
        require("location", &self.location)
    }

    fn build(self, id: String) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            date: format_display_date(&self.date),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description,
        }
    }
}

/// Format an ISO date (`2023-10-15`) for display (`Oct 15, 2023`).
///
/// Anything that is not an ISO date, including an already formatted one, is
/// returned unchanged.
#[must_use]
pub fn format_display_date(input: &str) -> String {
    let trimmed = input.trim();
    if !trimmed.contains('-') {
        return input.to_string();
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_or_else(
        |_| input.to_string(),
        |date| date.format("%b %-d, %Y").to_string(),
    )
}
