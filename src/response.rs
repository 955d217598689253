//! The JSON shape handed to consumers.
//!
//! ```json
//! { "configured": true, "events": [ { "title": "...", "start": "2024-01-15T14:30:00.000Z", ... } ] }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::IcalEvent;

/// An event tagged with the feed it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub title: String,
    #[serde(with = "iso8601")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub end: DateTime<Utc>,
    pub location: String,
    pub source: String,
}

impl NormalizedEvent {
    pub fn new(event: IcalEvent, source: impl Into<String>) -> Self {
        let IcalEvent {
            title,
            start,
            end,
            location,
        } = event;
        Self {
            title,
            start,
            end,
            location,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// `false` iff no feed is configured.
    pub configured: bool,
    pub events: Vec<NormalizedEvent>,
}

impl CalendarResponse {
    pub fn new(events: Vec<NormalizedEvent>) -> Self {
        Self {
            configured: true,
            events,
        }
    }

    pub fn not_configured() -> Self {
        Self {
            configured: false,
            events: vec![],
        }
    }

    /// Shape returned when the pipeline failed unexpectedly.
    pub fn degraded() -> Self {
        Self::new(vec![])
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-15T14:30:00.000Z`.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
