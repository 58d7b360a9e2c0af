use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use turf_booking::holds::{HoldError, ReleaseOutcome};
use turf_catalog::slot::CatalogError;
use turf_store::StoreError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HoldSlotRequest {
    pub slot_id: String,
    pub date: NaiveDate,
    pub session_id: String,
    pub hold_duration_minutes: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HoldSlotResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseSlotRequest {
    pub session_id: String,
    pub slot_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct ReleaseSlotResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/holds", post(hold_slot))
        .route("/v1/holds/release", post(release_slot))
}

/// Expected rejections (slot taken, closed day) come back as
/// `{success: false}` so the UI can refresh the catalog and re-prompt;
/// only malformed requests surface as HTTP errors.
async fn hold_slot(
    State(state): State<AppState>,
    Json(req): Json<HoldSlotRequest>,
) -> Result<Json<HoldSlotResponse>, AppError> {
    let result = state
        .store
        .hold_slot(&req.slot_id, req.date, &req.session_id, req.hold_duration_minutes)
        .await;

    match result {
        Ok(receipt) => Ok(Json(HoldSlotResponse {
            success: true,
            held_until: Some(receipt.held_until),
            message: None,
        })),
        Err(StoreError::Hold(HoldError::SlotUnavailable(_))) => Ok(Json(HoldSlotResponse {
            success: false,
            held_until: None,
            message: Some("SLOT_UNAVAILABLE".to_string()),
        })),
        Err(StoreError::ClosedDay { .. }) => Ok(Json(HoldSlotResponse {
            success: false,
            held_until: None,
            message: Some("CLOSED".to_string()),
        })),
        Err(StoreError::Catalog(CatalogError::UnknownSlot(id))) => {
            Err(AppError::NotFoundError(format!("unknown slot: {id}")))
        }
        Err(other) => Err(AppError::from_store(other)),
    }
}

/// Non-owner and already-lapsed releases are no-ops from the caller's
/// perspective; both are reported in the envelope and logged server-side.
async fn release_slot(
    State(state): State<AppState>,
    Json(req): Json<ReleaseSlotRequest>,
) -> Result<Json<ReleaseSlotResponse>, AppError> {
    let result = state
        .store
        .release_slot(&req.session_id, &req.slot_id, req.date)
        .await;

    match result {
        Ok(ReleaseOutcome::Released) => {
            info!(slot_id = %req.slot_id, "slot released");
            Ok(Json(ReleaseSlotResponse {
                success: true,
                message: None,
            }))
        }
        Ok(ReleaseOutcome::NotHeld) => Ok(Json(ReleaseSlotResponse {
            success: false,
            message: Some("NOT_HELD".to_string()),
        })),
        Err(StoreError::Hold(HoldError::NotOwner(_))) => Ok(Json(ReleaseSlotResponse {
            success: false,
            message: Some("NOT_OWNER".to_string()),
        })),
        Err(other) => Err(AppError::from_store(other)),
    }
}
