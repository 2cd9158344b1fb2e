//! Storage for the leaderboard's record table.
//!
//! Two layers:
//!
//! - **Backend** ([`TableDataStore`]): loads and atomically replaces the whole
//!   table. [`CsvFileDataStore`] persists it as a CSV file (layout in
//!   [`codec`]); [`MemoryDataStore`] keeps it in memory.
//! - **Resource** ([`RecordStore`]): wraps a backend in the table lock so
//!   that every read and every load→mutate→save cycle runs exclusively.
//!
//! Failures are reported as [`StorageError`] and never retried here.

pub mod codec;
pub mod datastores;
pub mod error;
pub mod record_store;
pub mod table_data_store;

pub use datastores::{CsvFileDataStore, MemoryDataStore};
pub use error::{ReadError, StorageError, WriteError};
pub use record_store::RecordStore;
pub use table_data_store::TableDataStore;
