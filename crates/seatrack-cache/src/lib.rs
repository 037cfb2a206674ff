//! Seatrack Persistence Layer
//!
//! Implements the `RecordStore` trait with a single JSON file and provides
//! the Cache Gate that decides whether a persisted record can be reused.
//!
//! # Examples
//!
//! ```no_run
//! use seatrack_cache::{CacheGate, JsonFileStore};
//!
//! let gate = CacheGate::new(JsonFileStore::new("results/tracking_result.json"));
//! let decision = gate.should_use_cache("SINI25432400");
//! if !decision.use_cache {
//!     // run a full retrieval
//! }
//! ```

#![warn(missing_docs)]

pub mod gate;

use seatrack_domain::traits::RecordStore;
use seatrack_domain::TrackingRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use gate::{CacheDecision, CacheGate};

/// Default location of the persisted record
pub const DEFAULT_CACHE_PATH: &str = "results/tracking_result.json";

/// Errors that can occur while reading or writing the record file
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File content is not a valid record
    #[error("Invalid record file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record store backed by one pretty-printed JSON file
///
/// Every save fully replaces the file; there is no history.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file path
    ///
    /// The file and its parent directories are created on first save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}

impl RecordStore for JsonFileStore {
    type Error = CacheError;

    fn load(&self) -> Result<Option<TrackingRecord>, Self::Error> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No record file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn save(&self, record: &TrackingRecord) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        // Readers only ever see a complete file: write beside the target, then rename
        let content = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }
        debug!("Saved record for {} to {}", record.booking_id, self.path.display());
        Ok(())
    }
}
