use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// Default look-ahead when the caller gives no upper bound.
const DEFAULT_SPAN_DAYS: i64 = 31;
/// Look-ahead used for upcoming-event alerts.
const ALERT_SPAN_MINUTES: i64 = 30;

/// Inclusive time window `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// `[now, now + 31 days]`
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        Self::new(now, now + TimeDelta::days(DEFAULT_SPAN_DAYS))
    }

    /// `[now, now + 30 minutes]`
    pub fn alert(now: DateTime<Utc>) -> Self {
        Self::new(now, now + TimeDelta::minutes(ALERT_SPAN_MINUTES))
    }

    /// Build a window from caller-supplied bounds.
    ///
    /// Each bound is read as RFC 3339 or as a `YYYY-MM-DD` date (UTC midnight). A missing
    /// or unreadable bound falls back to its [`TimeWindow::upcoming`] default on its own.
    pub fn from_params(from: Option<&str>, to: Option<&str>, now: DateTime<Utc>) -> Self {
        let default = Self::upcoming(now);
        Self {
            from: from.and_then(parse_bound).unwrap_or(default.from),
            to: to.and_then(parse_bound).unwrap_or(default.to),
        }
    }

    /// Whether `[start, end]` overlaps the window.
    #[inline]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end >= self.from && start <= self.to
    }
}

fn parse_bound(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
