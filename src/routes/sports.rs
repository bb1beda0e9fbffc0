use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use super::{json_body, MessageResponse};
use crate::db::{self, RowMap};
use crate::error::ApiError;
use crate::models::{SportCreate, SportUpdate};
use crate::AppState;

// GET /api/sport - List all sports (404 when there are none)
pub async fn list_sports(
    State(state): State<AppState>,
) -> Result<Json<Vec<RowMap>>, ApiError> {
    let sports = db::list_sports(&state.pool).await?;

    if sports.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(sports))
}

// GET /api/sport/:id - Get sport by ID
pub async fn get_sport(
    State(state): State<AppState>,
    Path(sport_id): Path<i64>,
) -> Result<Json<RowMap>, ApiError> {
    let sport = db::get_sport(&state.pool, sport_id).await?;

    if sport.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(sport))
}

// POST /api/sport - Create a sport, deriving the slug from the name if needed
pub async fn create_sport(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let sport = SportCreate::from_json(&json_body(payload)?)?;

    let id = db::insert_sport(&state.pool, &sport).await?;
    tracing::info!("Created sport {} ({})", id, sport.resolved_slug());

    Ok((StatusCode::CREATED, MessageResponse::new("Sport created successfully")))
}

// PATCH /api/sport/:id - Update only the fields present in the body
pub async fn update_sport(
    State(state): State<AppState>,
    Path(sport_id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = SportUpdate::from_json(&json_body(payload)?)?;

    if db::get_sport(&state.pool, sport_id).await?.is_empty() {
        return Err(ApiError::NotFound);
    }

    db::update_sport_fields(&state.pool, sport_id, update.assignments()).await?;

    Ok(MessageResponse::new("Sport updated successfully"))
}

// DELETE /api/sport/:id - Always 204, whether or not the sport existed
pub async fn delete_sport(
    State(state): State<AppState>,
    Path(sport_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    db::delete_sport(&state.pool, sport_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
