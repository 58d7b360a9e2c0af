use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use turf_booking::models::{Booking, CustomerInfo};
use turf_catalog::PaymentPlan;
use turf_store::BookingRequest;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub resource_id: Uuid,
    pub date: NaiveDate,
    pub slot_ids: Vec<String>,
    pub session_id: String,
    pub customer: CustomerInfo,
    pub payment_method: String,
    pub payment_plan: PaymentPlan,
    pub discount_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking_id: Uuid,
    pub booking_code: String,
    pub message: String,
    pub paid_amount: i64,
    pub total_amount: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking))
        .route("/v1/bookings/{booking_code}", get(get_booking))
}

/// All-or-nothing commit. The paid amount is recomputed server-side from
/// the catalog and discount table; any amounts the client computed for
/// display are ignored. Conflicts come back as 409 naming the slots.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<Vec<CreateBookingResponse>>, AppError> {
    let (booking, pricing) = state
        .store
        .create_booking(BookingRequest {
            resource_id: req.resource_id,
            date: req.date,
            slot_ids: req.slot_ids,
            session_id: req.session_id,
            customer: req.customer,
            payment_method: req.payment_method,
            plan: req.payment_plan,
            discount_code: req.discount_code,
        })
        .await
        .map_err(AppError::from_store)?;

    Ok(Json(vec![CreateBookingResponse {
        booking_id: booking.id,
        booking_code: booking.booking_code,
        message: "BOOKED".to_string(),
        paid_amount: pricing.payable_now,
        total_amount: pricing.total,
    }]))
}

/// Receipt lookup by the human-shareable booking code.
async fn get_booking(
    State(state): State<AppState>,
    Path(booking_code): Path<String>,
) -> Result<Json<Booking>, AppError> {
    state
        .store
        .find_booking(&booking_code)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("unknown booking: {booking_code}")))
}
