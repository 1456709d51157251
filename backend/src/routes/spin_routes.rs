use axum::{
    body::Bytes,
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::analytics::AnalyticsData;
use shared::shared_wheel_game::{RecordOutcomeRequest, SpinOutcome, SpinRequest, SpinResponse};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::{spin_service, wheel_service};
use crate::AppState;

/// Routes nested under `/api/wheels/:id`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/:id/spin", post(spin_wheel))
        .route("/:id/results", get(list_results).post(record_result))
        .route("/:id/analytics", get(analytics))
}

#[debug_handler]
async fn spin_wheel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<SpinResponse>, ApiError> {
    let request = parse_spin_request(&body)?;
    Ok(Json(spin_service::spin_wheel(&state, id, request).await?))
}

/// An empty body asks for a fresh spin. Anything else must be a valid `SpinRequest`.
fn parse_spin_request(body: &[u8]) -> Result<SpinRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SpinRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("invalid spin request: {}", e)))
}


async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordOutcomeRequest>,
) -> Result<(StatusCode, Json<SpinOutcome>), ApiError> {
    let outcome = wheel_service::record_outcome(&state, id, request).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn list_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SpinOutcome>>, ApiError> {
    Ok(Json(wheel_service::list_outcomes(&state, id).await?))
}

async fn analytics(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<AnalyticsData>, ApiError> {
    Ok(Json(wheel_service::wheel_analytics(&state, id).await?))
}
