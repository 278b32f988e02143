//! Core types for the log record model.
//!
//! This module provides:
//! - [`LogLevel`]: Severity levels accepted by the store
//! - [`LogRecord`]: A stored log record with all eight schema fields
//! - [`NewLogRecord`]: A record on its way in, whose timestamp may be absent
//! - [`LogRecordBuilder`]: Fluent construction of [`NewLogRecord`]s

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::query::QueryFilter;
use crate::timestamp::Timestamp;

/// Free-form record metadata: an ordered map of string keys to JSON values.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Wire names of every field a record must carry, in schema order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "level",
    "message",
    "resourceId",
    "timestamp",
    "traceId",
    "spanId",
    "commit",
    "metadata",
];

/// Wire names of the fields that must hold JSON strings.
pub const STRING_FIELDS: [&str; 6] = ["level", "message", "resourceId", "traceId", "spanId", "commit"];

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error conditions
    Error,
    /// Warning conditions
    Warn,
    /// General information
    Info,
    /// Debugging information
    Debug,
}

impl LogLevel {
    /// Every accepted level, in the order they are listed to callers.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Returns the string representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// The accepted level names joined for error messages: `error, warn, info, debug`.
    #[must_use]
    pub fn choices() -> String {
        Self::ALL.map(|level| level.as_str()).join(", ")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Case-sensitive: `"ERROR"` is rejected.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::UnknownLevel(s.to_string()))
    }
}

/// A persisted log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Severity level
    pub level: LogLevel,
    /// The log message
    pub message: String,
    /// Resource that emitted the record
    pub resource_id: String,
    /// When the record was produced
    pub timestamp: Timestamp,
    /// Distributed trace identifier
    pub trace_id: String,
    /// Span identifier within the trace
    pub span_id: String,
    /// Source revision of the emitting code
    pub commit: String,
    /// Additional structured fields
    pub metadata: Metadata,
}

impl LogRecord {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder() -> LogRecordBuilder {
        LogRecordBuilder::default()
    }

    /// Checks if this record matches every predicate set on `filter`.
    #[must_use]
    pub fn matches(&self, filter: &QueryFilter) -> bool {
        if filter.level.is_some_and(|level| level != self.level) {
            return false;
        }

        let substring_checks = [
            (&filter.message, &self.message),
            (&filter.resource_id, &self.resource_id),
            (&filter.trace_id, &self.trace_id),
            (&filter.span_id, &self.span_id),
            (&filter.commit, &self.commit),
        ];
        for (needle, haystack) in substring_checks {
            if let Some(needle) = needle {
                if !contains_ignore_case(haystack, needle) {
                    return false;
                }
            }
        }

        filter.time_range.contains(self.timestamp.instant())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A record submitted for storage. The store fills in `timestamp` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogRecord {
    /// Severity level
    pub level: LogLevel,
    /// The log message
    pub message: String,
    /// Resource that emitted the record
    pub resource_id: String,
    /// When the record was produced, if the caller knows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Distributed trace identifier
    pub trace_id: String,
    /// Span identifier within the trace
    pub span_id: String,
    /// Source revision of the emitting code
    pub commit: String,
    /// Additional structured fields
    pub metadata: Metadata,
}

impl NewLogRecord {
    /// Decodes a record from an already-validated JSON payload.
    ///
    /// Fields outside the schema are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not fit the schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Completes the record, stamping it with `now()` if it has no timestamp.
    #[must_use]
    pub fn into_record_with(self, now: impl FnOnce() -> Timestamp) -> LogRecord {
        LogRecord {
            level: self.level,
            message: self.message,
            resource_id: self.resource_id,
            timestamp: self.timestamp.unwrap_or_else(now),
            trace_id: self.trace_id,
            span_id: self.span_id,
            commit: self.commit,
            metadata: self.metadata,
        }
    }

    /// Completes the record using the current wall-clock time if needed.
    #[must_use]
    pub fn into_record(self) -> LogRecord {
        self.into_record_with(Timestamp::now)
    }
}

impl From<LogRecord> for NewLogRecord {
    fn from(record: LogRecord) -> Self {
        Self {
            level: record.level,
            message: record.message,
            resource_id: record.resource_id,
            timestamp: Some(record.timestamp),
            trace_id: record.trace_id,
            span_id: record.span_id,
            commit: record.commit,
            metadata: record.metadata,
        }
    }
}

/// Builder for constructing records to append.
#[derive(Debug, Default)]
pub struct LogRecordBuilder {
    level: Option<LogLevel>,
    message: Option<String>,
    resource_id: Option<String>,
    timestamp: Option<String>,
    trace_id: Option<String>,
    span_id: Option<String>,
    commit: Option<String>,
    metadata: Metadata,
}

impl LogRecordBuilder {
    /// Sets the log level.
    #[must_use]
    pub const fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the resource ID.
    #[must_use]
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Sets the timestamp text; it is parsed by [`build`](Self::build).
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets the span ID.
    #[must_use]
    pub fn span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }

    /// Sets the commit.
    #[must_use]
    pub fn commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    /// Adds a metadata field.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Builds the record, returning an error if required fields are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or the timestamp
    /// does not parse.
    pub fn build(self) -> Result<NewLogRecord> {
        let level = self.level.ok_or(LogError::MissingField("level"))?;
        let message = self.message.ok_or(LogError::MissingField("message"))?;
        let resource_id = self.resource_id.ok_or(LogError::MissingField("resourceId"))?;
        let trace_id = self.trace_id.ok_or(LogError::MissingField("traceId"))?;
        let span_id = self.span_id.ok_or(LogError::MissingField("spanId"))?;
        let commit = self.commit.ok_or(LogError::MissingField("commit"))?;
        let timestamp = self.timestamp.map(Timestamp::parse).transpose()?;

        Ok(NewLogRecord {
            level,
            message,
            resource_id,
            timestamp,
            trace_id,
            span_id,
            commit,
            metadata: self.metadata,
        })
    }
}
