//! # logvault-core
//!
//! Structured log record model and append-only log storage for logvault.
//!
//! This crate provides:
//!
//! - [`LogRecord`]: A stored record with level, message, identifiers,
//!   timestamp, commit and free-form metadata
//! - [`LogLevel`]: Severity levels (Error, Warn, Info, Debug)
//! - [`Timestamp`]: ISO-8601 timestamps that keep their original text
//! - [`QueryFilter`] / [`QueryParams`]: Typed and raw query filters
//! - [`LogStore`]: Abstract trait for log backends
//! - [`FileLogStore`]: Durable single-file JSON storage
//! - [`MemoryLogStore`]: In-memory storage
//!
//! ## Example
//!
//! ```rust
//! use logvault_core::{LogLevel, LogRecord, LogStore, MemoryLogStore, QueryFilter};
//!
//! let store = MemoryLogStore::new();
//! let record = LogRecord::builder()
//!     .level(LogLevel::Error)
//!     .message("Connection Timeout")
//!     .resource_id("api-1")
//!     .trace_id("trace-1")
//!     .span_id("span-1")
//!     .commit("5e5342f")
//!     .build()?;
//! LogStore::append(&store, record)?;
//!
//! let filter = QueryFilter::new()
//!     .with_level(LogLevel::Error)
//!     .with_message("timeout");
//! assert_eq!(LogStore::query(&store, &filter)?.len(), 1);
//! # Ok::<(), logvault_core::LogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod query;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{LogError, Result};
pub use file_store::{FileLogStore, FileLogStoreConfig};
pub use memory_store::{shared_memory_store, MemoryLogStore, SharedLogStore};
pub use query::{QueryFilter, QueryParams, TimeRange};
pub use timestamp::{parse_instant, Timestamp};
pub use traits::LogStore;
pub use types::{
    LogLevel, LogRecord, LogRecordBuilder, Metadata, NewLogRecord, REQUIRED_FIELDS, STRING_FIELDS,
};
