use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use turf_booking::committer::CommitError;
use turf_catalog::slot::CatalogError;
use turf_store::StoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    /// Booking conflict, naming the slots that failed validation.
    ConflictError {
        message: String,
        slot_ids: Vec<String>,
    },
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Map store failures from the booking path onto API errors. Hold-path
    /// failures never reach here; those are `{success: false}` envelopes.
    pub fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::Catalog(CatalogError::UnknownResource(id)) => {
                Self::NotFoundError(format!("unknown resource: {id}"))
            }
            StoreError::Catalog(CatalogError::UnknownSlot(id)) => {
                Self::NotFoundError(format!("unknown slot: {id}"))
            }
            StoreError::ClosedDay { date } => {
                Self::ConflictError {
                    message: format!("venue is closed on {date}"),
                    slot_ids: Vec::new(),
                }
            }
            StoreError::Commit(CommitError::SlotConflict { slot_ids }) => Self::ConflictError {
                message: "one or more slots are no longer available".to_string(),
                slot_ids,
            },
            StoreError::SlotMismatch { slot_id, resource_id } => Self::ValidationError(
                format!("slot {slot_id} does not belong to resource {resource_id}"),
            ),
            StoreError::Commit(other) => Self::ValidationError(other.to_string()),
            StoreError::Hold(other) => Self::ConflictError {
                message: other.to_string(),
                slot_ids: Vec::new(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError { message, slot_ids } => (
                StatusCode::CONFLICT,
                json!({ "error": message, "slot_ids": slot_ids }),
            ),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
