use chrono::Utc;
use shared::analytics::{self, AnalyticsData};
use shared::constants::{SEGMENT_NOT_FOUND_ERROR, WHEEL_NOT_FOUND_ERROR};
use shared::partition::Partition;
use shared::shared_wheel_game::{RecordOutcomeRequest, SpinOutcome, Wheel, WheelRequest};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::AppState;

/// Form rules first, then the engine's own check that the wheel can be partitioned.
fn check_request(request: &WheelRequest) -> Result<(), ApiError> {
    request.validate()?;
    Partition::new(request.segments.clone())?;
    Ok(())
}

pub async fn get_wheel(state: &AppState, id: Uuid) -> Result<Wheel, ApiError> {
    state
        .store
        .load_wheel(id)
        .await?
        .ok_or(ApiError::NotFound(WHEEL_NOT_FOUND_ERROR))
}

pub async fn list_wheels(state: &AppState, owner: Option<&str>) -> Result<Vec<Wheel>, ApiError> {
    let wheels = state.store.list_wheels(owner).await?;
    debug!("Listed {} wheels (owner filter: {:?})", wheels.len(), owner);
    Ok(wheels)
}

pub async fn create_wheel(state: &AppState, request: WheelRequest) -> Result<Wheel, ApiError> {
    check_request(&request)?;
    let wheel = Wheel::new(request, Utc::now());
    state.store.save_wheel(&wheel).await?;
    info!("Created wheel '{}' ({}) with {} segments", wheel.title, wheel.id, wheel.segments.len());
    Ok(wheel)
}

pub async fn update_wheel(state: &AppState, id: Uuid, request: WheelRequest) -> Result<Wheel, ApiError> {
    check_request(&request)?;
    let mut wheel = get_wheel(state, id).await?;
    wheel.apply(request, Utc::now());
    state.store.save_wheel(&wheel).await?;
    info!("Updated wheel '{}' ({})", wheel.title, wheel.id);
    Ok(wheel)
}

pub async fn delete_wheel(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    if !state.store.delete_wheel(id).await? {
        return Err(ApiError::NotFound(WHEEL_NOT_FOUND_ERROR));
    }
    info!("Deleted wheel {}", id);
    Ok(())
}

/// Stores the result of a spin that ran on the client.
pub async fn record_outcome(
    state: &AppState,
    wheel_id: Uuid,
    request: RecordOutcomeRequest,
) -> Result<SpinOutcome, ApiError> {
    let wheel = get_wheel(state, wheel_id).await?;
    let segment = wheel
        .segment(&request.segment_id)
        .ok_or(ApiError::NotFound(SEGMENT_NOT_FOUND_ERROR))?;
    let outcome = SpinOutcome::new(wheel.id, segment, Utc::now());
    state.store.append_outcome(&outcome).await?;
    info!("Recorded client spin on '{}': {}", wheel.title, outcome.segment_label);
    Ok(outcome)
}

pub async fn list_outcomes(state: &AppState, wheel_id: Uuid) -> Result<Vec<SpinOutcome>, ApiError> {
    get_wheel(state, wheel_id).await?;
    Ok(state.store.list_outcomes(wheel_id).await?)
}

pub async fn wheel_analytics(state: &AppState, wheel_id: Uuid) -> Result<AnalyticsData, ApiError> {
    let wheel = get_wheel(state, wheel_id).await?;
    let outcomes = state.store.list_outcomes(wheel_id).await?;
    Ok(analytics::summarize(&wheel, &outcomes))
}
