//! The record table resource and its lock.
//!
//! [`RecordStore`] is the only way the rest of the server touches the table.
//! It owns a [`TableDataStore`] backend and a single async mutex,
//! `table_lock`, and runs every read and every load→mutate→save cycle while
//! holding it. Two updates can never interleave their load and save halves,
//! so no write is lost to a read-modify-write race.

use std::sync::Arc;

use podium_core::RecordTable;
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::error::StorageError;
use super::table_data_store::TableDataStore;

/// Serialized access to the persisted record table.
pub struct RecordStore {
    backend: Arc<dyn TableDataStore>,
    table_lock: Mutex<()>,
}

impl RecordStore {
    #[must_use]
    pub fn new(backend: Arc<dyn TableDataStore>) -> Self {
        Self {
            backend,
            table_lock: Mutex::new(()),
        }
    }

    /// Human-readable location of the backing table.
    #[must_use]
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Bootstraps the backend (creates an empty table if none exists).
    ///
    /// Call once at startup, before serving requests.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        let _guard = self.table_lock.lock().await;
        self.backend.initialize().await.inspect_err(|e| {
            error!(location = %self.backend.location(), error = %e, "record table bootstrap failed");
        })
    }

    /// Loads the current table.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the table cannot be loaded.
    pub async fn read(&self) -> Result<RecordTable, StorageError> {
        let _guard = self.table_lock.lock().await;
        self.backend.load().await
    }

    /// Loads the table, applies `mutate`, and persists the result, all under
    /// the table lock. Returns the table that was saved.
    ///
    /// Nothing is persisted unless the load succeeds, and a failed save leaves
    /// the previous table in place. The lock is released on every path when
    /// the guard drops.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the load fails and
    /// [`StorageError::Write`] if the save fails.
    pub async fn update<F>(&self, mutate: F) -> Result<RecordTable, StorageError>
    where
        F: FnOnce(&RecordTable) -> RecordTable + Send,
    {
        let _guard = self.table_lock.lock().await;

        let current = self.backend.load().await?;
        let next = mutate(&current);
        self.backend.save(&next).await?;

        debug!(before = current.len(), after = next.len(), "record table updated");
        Ok(next)
    }
}
