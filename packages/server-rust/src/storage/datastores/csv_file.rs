//! CSV file [`TableDataStore`] implementation.
//!
//! [`CsvFileDataStore`] keeps the whole table in a single CSV file (see
//! [`codec`](crate::storage::codec) for the layout).
//!
//! # Atomic writes
//!
//! Saves never modify the live file in place:
//! 1. Write the encoded table to `<path>.tmp`
//! 2. fsync the temporary file
//! 3. Rename it over `<path>`
//! 4. fsync the parent directory (Unix only)
//!
//! Readers therefore see either the old or the new file. If any step fails
//! the temporary file is removed on a best-effort basis and the live file is
//! left as it was.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use podium_core::RecordTable;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::storage::codec::{decode_table, encode_table};
use crate::storage::error::{ReadError, StorageError, WriteError};
use crate::storage::table_data_store::TableDataStore;

/// Record table persisted as one CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileDataStore {
    path: PathBuf,
}

impl CsvFileDataStore {
    /// Creates a store for the file at `path`. Nothing is touched on disk
    /// until [`initialize`](TableDataStore::initialize) or a save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the live table file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for staging writes: `<path>.tmp`.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn write_atomic(&self, bytes: &[u8]) -> Result<(), WriteError> {
        let temp_path = self.temp_path();
        debug!(path = ?self.path, temp = ?temp_path, bytes = bytes.len(), "writing record table");

        if let Err(source) = self.stage_and_rename(&temp_path, bytes).await {
            // The temp file may not exist (or may not be a file); nothing to report.
            let _ = fs::remove_file(&temp_path).await;
            return Err(WriteError::Io {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }

    async fn stage_and_rename(&self, temp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(temp_path, &self.path).await?;
        sync_parent_dir(&self.path).await
    }
}

/// Makes the rename durable by syncing the directory entry.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[async_trait]
impl TableDataStore for CsvFileDataStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| WriteError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| ReadError::Io {
                path: self.path.clone(),
                source,
            })?;
        if exists {
            debug!(path = ?self.path, "record table already present");
            return Ok(());
        }

        self.write_atomic(&encode_table(&RecordTable::new())?).await?;
        info!(path = ?self.path, "created empty record table");
        Ok(())
    }

    async fn load(&self) -> Result<RecordTable, StorageError> {
        let bytes = fs::read(&self.path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ReadError::Missing {
                    path: self.path.clone(),
                }
            } else {
                ReadError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let table = decode_table(&bytes)?;
        debug!(path = ?self.path, records = table.len(), "loaded record table");
        Ok(table)
    }

    async fn save(&self, table: &RecordTable) -> Result<(), StorageError> {
        let bytes = encode_table(table)?;
        self.write_atomic(&bytes).await?;
        debug!(path = ?self.path, records = table.len(), "saved record table");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
