use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use turf_catalog::DiscountType;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct DiscountValidationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<i64>,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/discounts/validate", get(validate_code))
}

/// Pure read, safe on every keystroke. Unknown and inactive codes are the
/// same observable outcome: `message: "INVALID"`, never an error.
async fn validate_code(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Json<Vec<DiscountValidationResponse>> {
    let response = match state.store.validate_discount(&query.code) {
        Some(code) => DiscountValidationResponse {
            id: Some(code.id),
            discount_type: Some(code.discount_type),
            discount_value: Some(code.discount_value),
            message: "VALID".to_string(),
        },
        None => DiscountValidationResponse {
            id: None,
            discount_type: None,
            discount_value: None,
            message: "INVALID".to_string(),
        },
    };
    Json(vec![response])
}
