//! Upcoming-event alerts derived from a [`CalendarResponse`].
//!
//! The evaluator does no parsing of its own. It relies on the response's events
//! carrying well-formed instants.

use chrono::{DateTime, Utc};

use crate::response::{CalendarResponse, iso8601};

const ALERT_TITLE: &str = "Upcoming Event";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAlert {
    /// Stable per event, used by consumers to avoid showing an alert twice.
    pub id: String,
    pub title: String,
    pub message: String,
}

impl EventAlert {
    /// Alert for the earliest event that has not started yet, if any.
    pub fn upcoming(response: &CalendarResponse, now: DateTime<Utc>) -> Option<Self> {
        if !response.configured {
            return None;
        }
        let event = response
            .events
            .iter()
            .filter(|event| event.start >= now)
            .min_by_key(|event| event.start)?;

        let minutes = (event.start - now).num_minutes().max(0);
        Some(Self {
            id: format!("event-{}-{}", event.title, iso8601::format(&event.start)),
            title: ALERT_TITLE.to_owned(),
            message: format!("{} starts in {minutes} min", event.title),
        })
    }
}
