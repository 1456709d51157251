use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::shared_wheel_game::{Wheel, WheelListQuery, WheelRequest};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::wheel_service;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wheels).post(create_wheel))
        .route("/:id", get(get_wheel).put(update_wheel).delete(delete_wheel))
}

async fn list_wheels(
    State(state): State<AppState>,
    Query(query): Query<WheelListQuery>,
) -> Result<Json<Vec<Wheel>>, ApiError> {
    let wheels = wheel_service::list_wheels(&state, query.owner.as_deref()).await?;
    Ok(Json(wheels))
}

async fn create_wheel(
    State(state): State<AppState>,
    Json(request): Json<WheelRequest>,
) -> Result<(StatusCode, Json<Wheel>), ApiError> {
    let wheel = wheel_service::create_wheel(&state, request).await?;
    Ok((StatusCode::CREATED, Json(wheel)))
}

async fn get_wheel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Wheel>, ApiError> {
    Ok(Json(wheel_service::get_wheel(&state, id).await?))
}

async fn update_wheel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<WheelRequest>,
) -> Result<Json<Wheel>, ApiError> {
    Ok(Json(wheel_service::update_wheel(&state, id, request).await?))
}

async fn delete_wheel(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    wheel_service::delete_wheel(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
