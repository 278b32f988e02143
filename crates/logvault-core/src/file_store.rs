//! File-based log storage.
//!
//! This module provides:
//! - [`FileLogStore`]: Persistent log storage backed by a single JSON file
//! - Atomic whole-file replacement (write to a sibling, then rename)
//! - Serialized appends, so concurrent writers never lose a record
//! - Implementation of [`LogStore`]

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{LogError, Result};
use crate::query::QueryFilter;
use crate::traits::{sort_newest_first, LogStore};
use crate::types::{LogRecord, NewLogRecord};

/// Configuration for file-based log storage.
#[derive(Debug, Clone)]
pub struct FileLogStoreConfig {
    /// Location of the JSON file holding the collection.
    pub path: PathBuf,
    /// Write the file indented for humans.
    pub pretty: bool,
}

impl Default for FileLogStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/logs.json"),
            pretty: true,
        }
    }
}

impl FileLogStoreConfig {
    /// Creates a new config for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets whether the file is written indented.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// File-based log storage.
///
/// The whole collection lives in one JSON array. Every operation reloads it
/// from disk; every append rewrites it through a temporary sibling file that
/// is renamed over the original, so readers observe either the old or the
/// new collection. Appends are serialized by an internal lock.
#[derive(Debug)]
pub struct FileLogStore {
    config: FileLogStoreConfig,
    writer: Mutex<()>,
}

impl FileLogStore {
    /// Creates a new file log store. No I/O happens until first use.
    #[must_use]
    pub fn new(config: FileLogStoreConfig) -> Self {
        Self {
            config,
            writer: Mutex::new(()),
        }
    }

    /// Creates a file log store for `path` with default configuration.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileLogStoreConfig::new(path))
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FileLogStoreConfig {
        &self.config
    }

    /// Appends a record, stamping it with the current time if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing collection cannot be read or the new
    /// one cannot be written. The backing file is left untouched either way.
    pub fn append(&self, record: NewLogRecord) -> Result<LogRecord> {
        let _guard = self.writer.lock();

        let mut records = self.read_collection()?.unwrap_or_default();

        let record = record.into_record();
        records.push(record.clone());
        self.persist(&records)?;

        info!(
            level = %record.level,
            resource_id = %record.resource_id,
            total = records.len(),
            "appended log record"
        );
        Ok(record)
    }

    /// Queries records matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or decoded.
    pub fn query(&self, filter: &QueryFilter) -> Result<Vec<LogRecord>> {
        let mut records: Vec<LogRecord> = self
            .load()?
            .into_iter()
            .filter(|record| record.matches(filter))
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or decoded.
    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    // ========== Internal Methods ==========

    /// Loads the collection, creating an empty one if none exists yet.
    fn load(&self) -> Result<Vec<LogRecord>> {
        if let Some(records) = self.read_collection()? {
            return Ok(records);
        }

        let _guard = self.writer.lock();
        // A writer may have created the file while we waited.
        match self.read_collection()? {
            Some(records) => Ok(records),
            None => {
                self.persist(&[])?;
                Ok(Vec::new())
            }
        }
    }

    /// Reads and decodes the backing file. `None` means it does not exist.
    fn read_collection(&self) -> Result<Option<Vec<LogRecord>>> {
        let path = &self.config.path;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<LogRecord> =
            serde_json::from_slice(&bytes).map_err(|e| LogError::Corrupted {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), count = records.len(), "loaded log collection");
        Ok(Some(records))
    }

    /// Atomically replaces the backing file with `records`.
    fn persist(&self, records: &[LogRecord]) -> Result<()> {
        let path = &self.config.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(path)?;
        if let Err(e) = self.write_file(&temp_path, records) {
            discard_temp(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            discard_temp(&temp_path);
            return Err(e.into());
        }
        debug!(path = %path.display(), count = records.len(), "persisted log collection");
        Ok(())
    }

    fn write_file(&self, path: &Path, records: &[LogRecord]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut writer, records)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

/// `logs.json` -> `logs.json.tmp`, in the same directory so rename is atomic.
/// Best-effort removal of a temporary file left by a failed persist.
fn discard_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %temp_path.display(), error = %e, "failed to remove temporary file");
        }
    }
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(LogError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log store path has no file name: {}", path.display()),
        )));
    };
    let mut temp_name = OsString::from(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl LogStore for FileLogStore {
    fn append(&self, record: NewLogRecord) -> Result<LogRecord> {
        FileLogStore::append(self, record)
    }

    fn query(&self, filter: &QueryFilter) -> Result<Vec<LogRecord>> {
        FileLogStore::query(self, filter)
    }

    fn len(&self) -> Result<usize> {
        FileLogStore::len(self)
    }
}
