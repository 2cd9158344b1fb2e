//! The leaderboard service: list, podium, and add-record operations.
//!
//! Each operation runs inside an `info_span!("leaderboard_op")` that records
//! its duration and outcome, and every table access goes through the
//! [`RecordStore`] so it is serialized by the table lock.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use podium_core::{append_and_rerank, podium, RecordSubmission, RecordTable};
use tracing::{info, info_span, Instrument};

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::storage::{CsvFileDataStore, RecordStore};

/// Entry point for the three leaderboard operations.
///
/// Cheap to share: hold it in an `Arc` and clone the `Arc`.
pub struct LeaderboardService {
    store: Arc<RecordStore>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Builds a service over the CSV file named in `config`.
    ///
    /// Does not touch the file; call [`initialize`](Self::initialize) next.
    #[must_use]
    pub fn open(config: &ServiceConfig) -> Self {
        let backend = Arc::new(CsvFileDataStore::new(config.records_path.clone()));
        Self::new(Arc::new(RecordStore::new(backend)))
    }

    /// The record store behind this service.
    #[must_use]
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Creates the empty table on first run. Existing tables are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the bootstrap fails.
    pub async fn initialize(&self) -> Result<(), ServiceError> {
        self.store.initialize().await?;
        info!(location = %self.store.location(), "record table ready");
        Ok(())
    }

    /// Returns the full table, ordered by rank.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the table cannot be loaded.
    pub async fn list_records(&self) -> Result<RecordTable, ServiceError> {
        instrumented("list_records", async {
            Ok::<_, ServiceError>(self.store.read().await?)
        })
        .await
    }

    /// Returns the records ranked third or better.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the table cannot be loaded.
    pub async fn podium(&self) -> Result<RecordTable, ServiceError> {
        instrumented("podium", async {
            let table = self.store.read().await?;
            Ok::<_, ServiceError>(podium(&table))
        })
        .await
    }

    /// Validates `submission`, appends it, reranks the table, and persists
    /// the result. Returns the new table.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if the submission is rejected; storage
    ///   is not touched.
    /// - [`ServiceError::Storage`] if the load or the save fails; the
    ///   persisted table is unchanged.
    pub async fn add_record(
        &self,
        submission: RecordSubmission,
    ) -> Result<RecordTable, ServiceError> {
        instrumented("add_record", async {
            let record = submission.validate()?;
            let name = record.name().to_string();
            let duration_s = record.duration_s();

            let table = self
                .store
                .update(move |current| append_and_rerank(current, Some(record)))
                .await?;

            info!(%name, duration_s, records = table.len(), "record added");
            Ok::<_, ServiceError>(table)
        })
        .await
    }
}

/// Runs `fut` inside an operation span and records duration and outcome.
async fn instrumented<T, F>(op: &'static str, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let span = info_span!(
        "leaderboard_op",
        op = op,
        duration_ms = tracing::field::Empty,
        outcome = tracing::field::Empty,
    );

    async move {
        let start = Instant::now();
        let result = fut.await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };

        let current = tracing::Span::current();
        current.record("duration_ms", duration_ms);
        current.record("outcome", outcome);

        result
    }
    .instrument(span)
    .await
}
