//! Schema validation for logvault.
//!
//! Both validators are pure and never fail fast: they return a
//! [`ValidationResult`] listing every violation found in one pass, so the
//! caller can report them all at once.
//!
//! # Records
//!
//! ```
//! use logvault_validation::validate_log_entry;
//! use serde_json::json;
//!
//! let result = validate_log_entry(&json!({ "level": "fatal" }));
//! assert!(!result.is_valid);
//! // seven missing fields plus the bad level
//! assert_eq!(result.errors.len(), 8);
//! ```
//!
//! # Query parameters
//!
//! ```
//! use logvault_core::QueryParams;
//! use logvault_validation::validate_query_params;
//!
//! let params = QueryParams {
//!     timestamp_start: Some("2024-01-02".into()),
//!     timestamp_end: Some("2024-01-01".into()),
//!     ..QueryParams::default()
//! };
//! let result = validate_query_params(&params);
//! assert_eq!(result.messages(), vec!["timestamp_start must be before timestamp_end"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod entry;
mod error;
mod query;

pub use builder::{ValidationBuilder, ValidationResult};
pub use entry::validate_log_entry;
pub use error::{ValidationError, ValidationErrorKind};
pub use query::validate_query_params;
