use chrono::{DateTime, MappedLocalTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use derive_more::From;

use super::CalDateTimeError;

/// The observer zone used to place date-only and floating values on the timeline.
#[derive(Debug, Clone, Copy, Default, From, PartialEq, Eq)]
pub enum Tz {
    /// The ambient zone of the running process.
    #[default]
    Local,
    Olson(chrono_tz::Tz),
}

impl Tz {
    pub const UTC: Self = Self::Olson(chrono_tz::UTC);

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local => "Local",
            Self::Olson(tz) => tz.name(),
        }
    }

    /// Look up an IANA zone name such as `Europe/Berlin`.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse::<chrono_tz::Tz>().ok().map(Self::Olson)
    }

    /// Place a wall-clock time of this zone on the timeline.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant. Times inside a
    /// DST gap are shifted forward past the gap.
    pub fn resolve(&self, naive: &NaiveDateTime) -> Result<DateTime<Utc>, CalDateTimeError> {
        let resolved = match self {
            Self::Local => resolve_in(&chrono::Local, naive),
            Self::Olson(tz) => resolve_in(tz, naive),
        };
        resolved.ok_or_else(|| CalDateTimeError::NonexistentLocalTime(naive.to_string()))
    }
}

fn resolve_in<Z: TimeZone>(tz: &Z, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    let mapped = match tz.from_local_datetime(naive) {
        MappedLocalTime::None => tz.from_local_datetime(&(*naive + TimeDelta::hours(1))),
        mapped => mapped,
    };
    mapped.earliest().map(|dt| dt.with_timezone(&Utc))
}
