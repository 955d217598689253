use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::Tz;

lazy_static! {
    static ref RE_DATE: Regex = Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").unwrap();
    static ref RE_DATETIME_UTC: Regex =
        Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})T([0-9]{2})([0-9]{2})([0-9]{2})Z$").unwrap();
    static ref RE_DATETIME_FLOATING: Regex =
        Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})T([0-9]{2})([0-9]{2})([0-9]{2})$").unwrap();
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CalDateTimeError {
    #[error("Unrecognized date/time format: {0}")]
    InvalidFormat(String),
    #[error("Date/time out of range: {0}")]
    InvalidDate(String),
    #[error("Local time does not exist: {0}")]
    NonexistentLocalTime(String),
}

/// A decoded DATE or DATE-TIME value, before it is placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalDateTime {
    /// `YYYYMMDD`, midnight in the observer zone.
    Date(NaiveDate),
    /// `YYYYMMDDTHHMMSSZ`
    Utc(NaiveDateTime),
    /// `YYYYMMDDTHHMMSS`, wall-clock time in the observer zone.
    Floating(NaiveDateTime),
}

impl CalDateTime {
    /// Recognize one of the three supported encodings.
    ///
    /// Encodings are tried in the order date-only, UTC, floating.
    pub fn parse(value: &str) -> Result<Self, CalDateTimeError> {
        if let Some(captures) = RE_DATE.captures(value) {
            return Ok(Self::Date(date_from(value, &captures)?));
        }
        if let Some(captures) = RE_DATETIME_UTC.captures(value) {
            return Ok(Self::Utc(datetime_from(value, &captures)?));
        }
        if let Some(captures) = RE_DATETIME_FLOATING.captures(value) {
            return Ok(Self::Floating(datetime_from(value, &captures)?));
        }
        Err(CalDateTimeError::InvalidFormat(value.to_owned()))
    }

    /// Place the value on the timeline, reading date-only and floating values in `tz`.
    pub fn to_utc(&self, tz: &Tz) -> Result<DateTime<Utc>, CalDateTimeError> {
        match self {
            Self::Date(date) => tz.resolve(&date.and_time(NaiveTime::MIN)),
            Self::Utc(naive) => Ok(naive.and_utc()),
            Self::Floating(naive) => tz.resolve(naive),
        }
    }
}

/// Decode an ICS date value into an instant.
pub fn decode(value: &str, tz: &Tz) -> Result<DateTime<Utc>, CalDateTimeError> {
    CalDateTime::parse(value)?.to_utc(tz)
}

fn number(captures: &Captures, idx: usize) -> u32 {
    // The patterns only capture ASCII digits of bounded width
    captures[idx].parse().unwrap_or_default()
}

/// Fields past their range carry over into the next unit, so `20240230` is March 1st
/// and `T240000` is midnight of the following day.
fn date_from(value: &str, captures: &Captures) -> Result<NaiveDate, CalDateTimeError> {
    let invalid = || CalDateTimeError::InvalidDate(value.to_owned());

    let new_year = NaiveDate::from_ymd_opt(number(captures, 1) as i32, 1, 1).ok_or_else(invalid)?;
    // Month 00 is December of the previous year
    let month = match number(captures, 2) {
        0 => new_year.checked_sub_months(Months::new(1)),
        month => new_year.checked_add_months(Months::new(month - 1)),
    }
    .ok_or_else(invalid)?;
    month
        .checked_add_signed(TimeDelta::days(i64::from(number(captures, 3)) - 1))
        .ok_or_else(invalid)
}

fn datetime_from(value: &str, captures: &Captures) -> Result<NaiveDateTime, CalDateTimeError> {
    let offset = TimeDelta::hours(i64::from(number(captures, 4)))
        + TimeDelta::minutes(i64::from(number(captures, 5)))
        + TimeDelta::seconds(i64::from(number(captures, 6)));
    date_from(value, captures)?
        .and_time(NaiveTime::MIN)
        .checked_add_signed(offset)
        .ok_or_else(|| CalDateTimeError::InvalidDate(value.to_owned()))
}
