//! Validation of incoming log records.

use logvault_core::{parse_instant, LogLevel, REQUIRED_FIELDS, STRING_FIELDS};
use serde_json::Value;

use crate::builder::{ValidationBuilder, ValidationResult};
use crate::error::ValidationError;

/// Checks an untyped payload against the log record schema.
///
/// Every violation is reported, in this order: missing fields (schema
/// order), level value, string types, timestamp format, metadata type. A
/// payload that is not an object yields a single error.
#[must_use]
pub fn validate_log_entry(candidate: &Value) -> ValidationResult {
    let Some(fields) = candidate.as_object() else {
        return ValidationResult::from_errors(vec![ValidationError::not_an_object()]);
    };

    let mut builder = ValidationBuilder::new();

    for field in REQUIRED_FIELDS {
        builder = builder.check(fields.contains_key(field), || ValidationError::missing(field));
    }

    if let Some(level) = fields.get("level") {
        let known = level
            .as_str()
            .is_some_and(|name| name.parse::<LogLevel>().is_ok());
        builder = builder.check(known, ValidationError::invalid_level);
    }

    for field in STRING_FIELDS {
        if let Some(value) = fields.get(field) {
            builder = builder.check(value.is_string(), || ValidationError::not_a_string(field));
        }
    }

    if let Some(timestamp) = fields.get("timestamp") {
        let parses = timestamp.as_str().and_then(parse_instant).is_some();
        builder = builder.check(parses, || ValidationError::invalid_timestamp("timestamp"));
    }

    if let Some(metadata) = fields.get("metadata") {
        builder = builder.check(metadata.is_object(), ValidationError::metadata_not_object);
    }

    builder.finish()
}
