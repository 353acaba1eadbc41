//! Handlers for Health endpoint endpoints.

use warp::http::StatusCode;
use warp::reply::{json, with_status};

use crate::api::models::health::HealthData;

/// Get health handler.
#[utoipa::path(
    get,
    operation_id = "checkHealth",
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Successfully retrieved health data.", body = HealthData),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_health() -> impl warp::reply::Reply {
    with_status(json(&HealthData::ok()), StatusCode::OK)
}
