//! Query filters.
//!
//! [`QueryParams`] is the raw, string-valued parameter set a caller sends;
//! [`QueryFilter`] is its typed form, consumed by [`crate::LogStore::query`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::timestamp::parse_instant;
use crate::types::LogLevel;

/// Time range for filtering records. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the time range (inclusive)
    pub start: Option<DateTime<Utc>>,
    /// End of the time range (inclusive)
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Creates a new time range with the given bounds.
    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Checks if a timestamp falls within this range.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        if self.start.is_some_and(|start| timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| timestamp > end) {
            return false;
        }
        true
    }

    /// True when the start bound lies after the end bound.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

/// Filter criteria for querying records. Unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Exact level match
    pub level: Option<LogLevel>,
    /// Case-insensitive substring of the message
    pub message: Option<String>,
    /// Case-insensitive substring of the resource ID
    pub resource_id: Option<String>,
    /// Case-insensitive substring of the trace ID
    pub trace_id: Option<String>,
    /// Case-insensitive substring of the span ID
    pub span_id: Option<String>,
    /// Case-insensitive substring of the commit
    pub commit: Option<String>,
    /// Time range filter
    pub time_range: TimeRange,
}

impl QueryFilter {
    /// Creates a new empty filter that matches all records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a level filter.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a message search filter.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Adds a resource ID filter.
    #[must_use]
    pub fn with_resource_id(mut self, text: impl Into<String>) -> Self {
        self.resource_id = Some(text.into());
        self
    }

    /// Adds a trace ID filter.
    #[must_use]
    pub fn with_trace_id(mut self, text: impl Into<String>) -> Self {
        self.trace_id = Some(text.into());
        self
    }

    /// Adds a span ID filter.
    #[must_use]
    pub fn with_span_id(mut self, text: impl Into<String>) -> Self {
        self.span_id = Some(text.into());
        self
    }

    /// Adds a commit filter.
    #[must_use]
    pub fn with_commit(mut self, text: impl Into<String>) -> Self {
        self.commit = Some(text.into());
        self
    }

    /// Adds a time range filter.
    #[must_use]
    pub const fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }
}

/// Raw query parameters, as received from a caller.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Level name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Message search text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Resource ID search text
    #[serde(default, rename = "resourceId", skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Trace ID search text
    #[serde(default, rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Span ID search text
    #[serde(default, rename = "spanId", skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    /// Commit search text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Lower time bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_start: Option<String>,
    /// Upper time bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_end: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl QueryParams {
    /// The `level` parameter, if set and non-empty.
    #[must_use]
    pub fn level(&self) -> Option<&str> {
        non_empty(self.level.as_ref())
    }

    /// The `timestamp_start` parameter, if set and non-empty.
    #[must_use]
    pub fn timestamp_start(&self) -> Option<&str> {
        non_empty(self.timestamp_start.as_ref())
    }

    /// The `timestamp_end` parameter, if set and non-empty.
    #[must_use]
    pub fn timestamp_end(&self) -> Option<&str> {
        non_empty(self.timestamp_end.as_ref())
    }

    /// Converts the parameters into a typed filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the level or either time bound does not parse.
    pub fn to_filter(&self) -> Result<QueryFilter> {
        let level = self.level().map(str::parse::<LogLevel>).transpose()?;

        let bound = |name: &str, value: Option<&str>| -> Result<Option<DateTime<Utc>>> {
            value
                .map(|raw| {
                    parse_instant(raw)
                        .ok_or_else(|| LogError::InvalidFilter(format!("{name} is not a date/time: {raw}")))
                })
                .transpose()
        };
        let time_range = TimeRange::new(
            bound("timestamp_start", self.timestamp_start())?,
            bound("timestamp_end", self.timestamp_end())?,
        );

        let text = |value: Option<&String>| non_empty(value).map(str::to_string);

        Ok(QueryFilter {
            level,
            message: text(self.message.as_ref()),
            resource_id: text(self.resource_id.as_ref()),
            trace_id: text(self.trace_id.as_ref()),
            span_id: text(self.span_id.as_ref()),
            commit: text(self.commit.as_ref()),
            time_range,
        })
    }
}

impl TryFrom<&QueryParams> for QueryFilter {
    type Error = LogError;

    fn try_from(params: &QueryParams) -> Result<Self> {
        params.to_filter()
    }
}
