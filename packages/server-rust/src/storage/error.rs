//! Storage error taxonomy.
//!
//! Every failure of the record table resource is either a [`ReadError`]
//! (the table could not be opened or parsed) or a [`WriteError`] (the table
//! could not be persisted). Neither is retried inside the storage layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a storage operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read error: {0}")]
    Read(#[from] ReadError),
    #[error("storage write error: {0}")]
    Write(#[from] WriteError),
}

/// The persisted table exists but cannot be opened or parsed, or is missing
/// when it was expected to have been initialized.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("record table {} has not been initialized", path.display())]
    Missing { path: PathBuf },
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unexpected header {found:?}")]
    Header { found: Vec<String> },
    #[error("malformed row at line {line}: {reason}")]
    Row { line: u64, reason: String },
}

/// The table could not be persisted. The previously persisted table is
/// still intact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot encode record table: {0}")]
    Encode(String),
}

impl StorageError {
    /// Returns `true` for read-side failures.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read(_))
    }

    /// Returns `true` for write-side failures.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}
