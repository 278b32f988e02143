//! Validation error types with caller-facing messages.

use std::fmt;

use logvault_core::LogLevel;
use serde::{Serialize, Serializer};

/// The kind of validation error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The payload is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingField,
    /// A record's level is not one of the accepted values.
    InvalidLevel,
    /// A query's level filter is not one of the accepted values.
    InvalidLevelFilter,
    /// A field that must be a string holds another JSON type.
    NotAString,
    /// A date/time value does not parse.
    InvalidTimestamp,
    /// The metadata field is not a JSON object.
    MetadataNotObject,
    /// The time range starts after it ends.
    InvertedRange,
}

/// Error returned when validation fails.
///
/// Renders as a single sentence for the caller, both through `Display` and
/// when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The name of the field that failed validation.
    pub field: String,
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// The payload as a whole is not an object.
    #[must_use]
    pub fn not_an_object() -> Self {
        Self::new("body", ValidationErrorKind::NotAnObject)
    }

    /// Create a "missing field" validation error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::MissingField)
    }

    /// Create an "invalid level" validation error for a record.
    #[must_use]
    pub fn invalid_level() -> Self {
        Self::new("level", ValidationErrorKind::InvalidLevel)
    }

    /// Create an "invalid level filter" validation error for a query.
    #[must_use]
    pub fn invalid_level_filter() -> Self {
        Self::new("level", ValidationErrorKind::InvalidLevelFilter)
    }

    /// Create a "not a string" validation error.
    #[must_use]
    pub fn not_a_string(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::NotAString)
    }

    /// Create an "invalid timestamp" validation error.
    #[must_use]
    pub fn invalid_timestamp(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::InvalidTimestamp)
    }

    /// Create a "metadata must be an object" validation error.
    #[must_use]
    pub fn metadata_not_object() -> Self {
        Self::new("metadata", ValidationErrorKind::MetadataNotObject)
    }

    /// Create an "inverted time range" validation error.
    #[must_use]
    pub fn inverted_range() -> Self {
        Self::new("timestamp_start", ValidationErrorKind::InvertedRange)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = &self.field;
        match self.kind {
            ValidationErrorKind::NotAnObject => {
                write!(f, "Request body must be a valid JSON object")
            }
            ValidationErrorKind::MissingField => write!(f, "Missing required field: {field}"),
            ValidationErrorKind::InvalidLevel => {
                write!(f, "Invalid level. Must be one of: {}", LogLevel::choices())
            }
            ValidationErrorKind::InvalidLevelFilter => {
                write!(f, "Invalid level filter. Must be one of: {}", LogLevel::choices())
            }
            ValidationErrorKind::NotAString => write!(f, "Field '{field}' must be a string"),
            ValidationErrorKind::InvalidTimestamp => {
                write!(f, "Invalid {field} format. Must be a valid ISO 8601 string")
            }
            ValidationErrorKind::MetadataNotObject => write!(f, "Metadata must be an object"),
            ValidationErrorKind::InvertedRange => {
                write!(f, "timestamp_start must be before timestamp_end")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
