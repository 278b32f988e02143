//! Validation of query parameters.

use logvault_core::{parse_instant, LogLevel, QueryParams};

use crate::builder::{ValidationBuilder, ValidationResult};
use crate::error::ValidationError;

/// Checks a query parameter set. Empty parameters are treated as absent.
///
/// Reports an unknown level, each unparseable time bound, and a start bound
/// later than the end bound. Equal bounds are accepted.
#[must_use]
pub fn validate_query_params(params: &QueryParams) -> ValidationResult {
    let mut builder = ValidationBuilder::new();

    if let Some(level) = params.level() {
        builder = builder.check(
            level.parse::<LogLevel>().is_ok(),
            ValidationError::invalid_level_filter,
        );
    }

    let start = params.timestamp_start().map(parse_instant);
    let end = params.timestamp_end().map(parse_instant);

    builder = builder
        .check(!matches!(start, Some(None)), || {
            ValidationError::invalid_timestamp("timestamp_start")
        })
        .check(!matches!(end, Some(None)), || {
            ValidationError::invalid_timestamp("timestamp_end")
        });

    if let (Some(Some(start)), Some(Some(end))) = (start, end) {
        builder = builder.check(start <= end, ValidationError::inverted_range);
    }

    builder.finish()
}
