//! Validation builder for fluent validation chains.

use serde::Serialize;

use crate::error::ValidationError;

/// Outcome of a validation pass: every violation found, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no violation was found.
    pub is_valid: bool,
    /// All violations, in the order they were detected.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A result carrying `errors`; valid only if the list is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// The caller-facing message of every error.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// A builder for performing multiple validations with error collection.
///
/// Checks never short-circuit; every failing check adds its error.
///
/// # Example
///
/// ```
/// use logvault_validation::{ValidationBuilder, ValidationError};
///
/// let result = ValidationBuilder::new()
///     .check(true, || ValidationError::missing("level"))
///     .check(false, || ValidationError::missing("message"))
///     .finish();
///
/// assert!(!result.is_valid);
/// assert_eq!(result.messages(), vec!["Missing required field: message"]);
/// ```
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<ValidationError>,
}

impl ValidationBuilder {
    /// Create a new validation builder.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records the error from `error` unless `ok` holds.
    #[must_use]
    pub fn check<F>(mut self, ok: bool, error: F) -> Self
    where
        F: FnOnce() -> ValidationError,
    {
        if !ok {
            self.errors.push(error());
        }
        self
    }

    /// Finish validation and return the accumulated result.
    #[must_use]
    pub fn finish(self) -> ValidationResult {
        ValidationResult::from_errors(self.errors)
    }
}
