//! Traits for log storage backends.
//!
//! This module provides the [`LogStore`] trait for abstracting over the
//! file-backed and in-memory implementations.

use tracing::error;

use crate::error::Result;
use crate::query::QueryFilter;
use crate::types::{LogRecord, NewLogRecord};

/// Trait for log storage backends.
///
/// Implementors provide append-only persistence and filtered reads. The
/// collection is never updated or deleted from.
pub trait LogStore: Send + Sync {
    /// Appends a record to the end of the collection.
    ///
    /// A record without a timestamp is stamped with the current time. The
    /// returned record is exactly what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be durably stored. In that
    /// case the collection is unchanged.
    fn append(&self, record: NewLogRecord) -> Result<LogRecord>;

    /// Returns every record matching `filter`, newest first.
    ///
    /// Records with equal timestamps keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read.
    fn query(&self, filter: &QueryFilter) -> Result<Vec<LogRecord>>;

    /// Returns the number of stored records.
    fn len(&self) -> Result<usize>;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Like [`query`](Self::query), but an unreadable store yields an empty
    /// result. The failure is logged.
    fn query_or_empty(&self, filter: &QueryFilter) -> Vec<LogRecord> {
        self.query(filter).unwrap_or_else(|e| {
            error!(error = %e, "failed to read log store, returning no records");
            Vec::new()
        })
    }
}

/// Sorts records newest first, keeping insertion order between equal instants.
pub(crate) fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| b.timestamp.instant().cmp(&a.timestamp.instant()));
}
