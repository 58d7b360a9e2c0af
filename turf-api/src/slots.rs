use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use turf_catalog::DayAvailability;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/resources/{resource_id}/slots", get(get_slots))
}

/// Shift-grouped slots with live status for one `(resource, date)`, or an
/// explicit `{closed: true}` body when the venue is closed that day.
async fn get_slots(
    State(state): State<AppState>,
    Path(resource_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<DayAvailability>, AppError> {
    let availability = state
        .store
        .get_slots(resource_id, query.date)
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(availability))
}
