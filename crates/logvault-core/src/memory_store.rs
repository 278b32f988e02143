//! In-memory log storage.
//!
//! [`MemoryLogStore`] keeps the collection in a `Vec` behind a lock and never
//! touches disk. It has the same ordering and filtering semantics as
//! [`crate::FileLogStore`] and backs ephemeral servers and tests.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::query::QueryFilter;
use crate::traits::{sort_newest_first, LogStore};
use crate::types::{LogRecord, NewLogRecord};

/// Thread-safe in-memory log store.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    /// All records, ordered by insertion
    records: RwLock<Vec<LogRecord>>,
}

impl MemoryLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, stamping it with the current time if needed.
    pub fn append(&self, record: NewLogRecord) -> LogRecord {
        let record = record.into_record();
        let mut records = self.records.write();
        records.push(record.clone());
        debug!(total = records.len(), "appended log record in memory");
        record
    }

    /// Queries records matching the filter, newest first.
    #[must_use]
    pub fn query(&self, filter: &QueryFilter) -> Vec<LogRecord> {
        let mut matching: Vec<LogRecord> = self
            .records
            .read()
            .iter()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        matching
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Shared, type-erased log store handle.
pub type SharedLogStore = Arc<dyn LogStore>;

/// Creates a new shared in-memory store.
#[must_use]
pub fn shared_memory_store() -> SharedLogStore {
    Arc::new(MemoryLogStore::new())
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl LogStore for MemoryLogStore {
    fn append(&self, record: NewLogRecord) -> Result<LogRecord> {
        Ok(MemoryLogStore::append(self, record))
    }

    fn query(&self, filter: &QueryFilter) -> Result<Vec<LogRecord>> {
        Ok(MemoryLogStore::query(self, filter))
    }

    fn len(&self) -> Result<usize> {
        Ok(MemoryLogStore::len(self))
    }
}
