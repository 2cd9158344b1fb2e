//! Leaderboard endpoints: welcome, full table, podium, and record submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use podium_core::{Record, RecordSubmission};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::AppState;
use crate::service::ServiceError;
use crate::storage::StorageError;

pub const WELCOME_MESSAGE: &str = "Welcome to the Swiss Cycling North-to-South Backend!";

/// Body of `GET /records`.
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<Record>,
}

/// Body of `GET /podium`.
#[derive(Debug, Serialize)]
pub struct PodiumResponse {
    pub podium: Vec<Record>,
}

/// Body of a successful `POST /add-record`.
#[derive(Debug, Serialize)]
pub struct AddRecordResponse {
    pub message: &'static str,
    pub status: u16,
}

/// HTTP mapping of a failed leaderboard operation.
///
/// Validation failures echo their message with 422. Storage failures are
/// logged with full detail and answered with a generic 500.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            ServiceError::Validation(e) => {
                warn!(error = %e, "record rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ServiceError::Storage(e @ StorageError::Read(_)) => {
                error!(error = %e, "Error loading records");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error loading records.".to_string(),
                )
            }
            ServiceError::Storage(e @ StorageError::Write(_)) => {
                error!(error = %e, "Error saving records");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error saving records.".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub async fn root_handler() -> Json<serde_json::Value> {
    info!("Received GET /");
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// `GET /records`: the whole table in rank order.
pub async fn list_records_handler(
    State(state): State<AppState>,
) -> Result<Json<RecordsResponse>, ApiError> {
    info!("Received GET /records");
    let table = state.service.list_records().await?;
    Ok(Json(RecordsResponse {
        records: table.into_records(),
    }))
}

/// `GET /podium`: records ranked third or better.
pub async fn podium_handler(
    State(state): State<AppState>,
) -> Result<Json<PodiumResponse>, ApiError> {
    info!("Received GET /podium");
    let table = state.service.podium().await?;
    Ok(Json(PodiumResponse {
        podium: table.into_records(),
    }))
}

/// `POST /add-record`: validates, appends, reranks, and persists.
///
/// A body that does not deserialize into [`RecordSubmission`] is rejected by
/// the `Json` extractor before this handler runs.
pub async fn add_record_handler(
    State(state): State<AppState>,
    Json(submission): Json<RecordSubmission>,
) -> Result<Json<AddRecordResponse>, ApiError> {
    info!(name = %submission.name, "Received POST /add-record");
    state.service.add_record(submission).await?;
    Ok(Json(AddRecordResponse {
        message: "Record added successfully",
        status: StatusCode::OK.as_u16(),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use podium_core::ValidationError;

    use super::*;
    use crate::network::NetworkConfig;
    use crate::service::LeaderboardService;
    use crate::storage::{MemoryDataStore, ReadError, RecordStore};

    async fn state_with_backend() -> (Arc<MemoryDataStore>, AppState) {
        let backend = Arc::new(MemoryDataStore::new());
        let service = LeaderboardService::new(Arc::new(RecordStore::new(backend.clone())));
        service.initialize().await.unwrap();
        let state = AppState::new(Arc::new(service), Arc::new(NetworkConfig::default()));
        (backend, state)
    }

    fn submission(name: &str, duration_s: i64) -> RecordSubmission {
        RecordSubmission {
            name: name.to_string(),
            datetime: "2024-06-01T08:30:00Z".to_string(),
            duration_s,
            avatar_url: None,
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_greets() {
        let json = root_handler().await.0;
        assert_eq!(json["message"], WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn add_then_list_and_podium() {
        let (_, state) = state_with_backend().await;
        for (name, d) in [("A", 60_000), ("B", 50_000), ("C", 72_300), ("D", 30_044)] {
            let ok = add_record_handler(State(state.clone()), Json(submission(name, d)))
                .await
                .unwrap();
            assert_eq!(ok.0.message, "Record added successfully");
            assert_eq!(ok.0.status, 200);
        }

        let records = list_records_handler(State(state.clone())).await.unwrap().0;
        let names: Vec<&str> = records.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "A", "C"]);

        let podium = podium_handler(State(state)).await.unwrap().0;
        assert_eq!(podium.podium.len(), 3);
        assert!(podium.podium.iter().all(|r| r.rank <= 3));
    }

    #[tokio::test]
    async fn validation_error_is_422_with_detail() {
        let (backend, state) = state_with_backend().await;

        let err = add_record_handler(State(state), Json(submission("  ", 10)))
            .await
            .unwrap_err();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["detail"], ValidationError::EmptyName.to_string());
        assert_eq!(backend.save_count(), 1);
    }

    #[tokio::test]
    async fn failed_save_is_500_with_generic_detail() {
        let (backend, state) = state_with_backend().await;
        backend.set_fail_saves(true);

        let err = add_record_handler(State(state), Json(submission("A", 10)))
            .await
            .unwrap_err();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Error saving records.");
    }

    #[tokio::test]
    async fn read_failure_is_500_with_generic_detail() {
        let err = ApiError::from(ServiceError::from(StorageError::from(ReadError::Missing {
            path: PathBuf::from("/nowhere/records.csv"),
        })));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Error loading records.");
        assert!(!json.to_string().contains("nowhere"));
    }
}
