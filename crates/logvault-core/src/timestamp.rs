//! ISO-8601 timestamps that remember how they were written.
//!
//! Records are returned to callers exactly as they were ingested, so a
//! [`Timestamp`] keeps the original text next to the parsed instant. Ordering
//! and range checks use the instant; serialization writes the text back.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LogError, Result};

/// Offset-carrying layouts beyond strict RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Layouts without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 date or date-time into a UTC instant.
///
/// Accepts RFC 3339, offsets written without a colon, minute precision with
/// or without a zone, naive date-times (interpreted as UTC) and the reduced
/// date forms `YYYY-MM-DD`, `YYYY-MM` and `YYYY`, which resolve to the first
/// instant of the period in UTC. Returns `None` for anything else.
#[must_use]
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // `%z` does not take a `Z` designator; the rest is UTC wall time.
    let naive_input = input.strip_suffix(['Z', 'z']).unwrap_or(input);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_reduced_date(input))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM` or `YYYY`, as the first day of that month or year.
fn parse_reduced_date(input: &str) -> Option<NaiveDate> {
    fn digits(text: &str, len: usize) -> bool {
        text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
    }

    let (year, month) = match input.split_once('-') {
        Some((year, month)) if digits(month, 2) => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (input, 1),
    };
    if !digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// A validated point in time plus its original textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parses a timestamp, keeping `input` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidTimestamp`] if `input` is not a date/time.
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let raw = input.into();
        let instant = parse_instant(&raw).ok_or_else(|| LogError::InvalidTimestamp(raw.clone()))?;
        Ok(Self { raw, instant })
    }

    /// The current instant, rendered like `2024-01-01T12:00:00.000Z`.
    #[must_use]
    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    /// Builds a timestamp from an instant, truncated to milliseconds.
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        let millis = instant.timestamp_subsec_millis();
        let instant = instant.with_nanosecond(millis * 1_000_000).unwrap_or(instant);
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }

    /// The text this timestamp was created from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant.
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Timestamp {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_instant(instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}
