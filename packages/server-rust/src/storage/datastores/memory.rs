//! In-memory [`TableDataStore`] implementation.
//!
//! [`MemoryDataStore`] holds the table in a mutex-guarded slot. It behaves
//! like a file backend that has never been bootstrapped until
//! [`initialize`](TableDataStore::initialize) is called, and it can be told to
//! fail saves so that callers' failure paths can be exercised.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use podium_core::RecordTable;

use crate::storage::error::{ReadError, StorageError, WriteError};
use crate::storage::table_data_store::TableDataStore;

const LOCATION: &str = ":memory:";

/// Volatile table backend for tests and ephemeral data.
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    table: Mutex<Option<RecordTable>>,
    fail_saves: AtomicBool,
    saves: AtomicU64,
}

impl MemoryDataStore {
    /// Creates an uninitialized store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `table`.
    #[must_use]
    pub fn with_table(table: RecordTable) -> Self {
        Self {
            table: Mutex::new(Some(table)),
            ..Self::default()
        }
    }

    /// While `fail` is set, every save returns a write error and leaves the
    /// held table untouched.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves, including the bootstrap write.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableDataStore for MemoryDataStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        let mut slot = self.table.lock();
        if slot.is_none() {
            *slot = Some(RecordTable::new());
            self.saves.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn load(&self) -> Result<RecordTable, StorageError> {
        self.table.lock().clone().ok_or_else(|| {
            ReadError::Missing {
                path: PathBuf::from(LOCATION),
            }
            .into()
        })
    }

    async fn save(&self, table: &RecordTable) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(WriteError::Io {
                path: PathBuf::from(LOCATION),
                source: io::Error::other("simulated disk error"),
            }
            .into());
        }
        *self.table.lock() = Some(table.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}
