use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use super::json_body;
use crate::db::{self, RowMap};
use crate::error::ApiError;
use crate::models::{EventCreate, EventUpdate};
use crate::AppState;

// GET /api/events - List all events
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<RowMap>>, ApiError> {
    let events = db::list_events(&state.pool).await?;
    Ok(Json(events))
}

// GET /api/events/:id - Get event by ID
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<RowMap>, ApiError> {
    let event = db::get_event(&state.pool, event_id).await?;

    if event.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(event))
}

/// POST /api/events - Create an event
///
/// The slug is derived from the name when missing, and names of the form
/// "Home v Away" get both team logos attached before the row is written.
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RowMap>), ApiError> {
    let event = EventCreate::from_json(&json_body(payload)?)?;

    let logos = state.logos.logos_for_event(&event.name).await;
    let created = db::insert_event(&state.pool, &event.into_record(), logos).await?;

    tracing::info!("Created event {:?}", created.get("id"));
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/events/:id - Replace an event
///
/// Unlike the sport PATCH, fields left out of the body are not preserved:
/// they are written back as their create defaults or null.
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RowMap>, ApiError> {
    let update = EventUpdate::from_json(&json_body(payload)?)?;

    let updated = db::replace_event(&state.pool, event_id, &update.into_record()).await?;

    if updated.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(updated))
}

// DELETE /api/events/:id - Delete an event, confirming it is gone afterwards
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if db::get_event(&state.pool, event_id).await?.is_empty() {
        return Err(ApiError::NotFound);
    }

    db::delete_event(&state.pool, event_id).await?;

    if !db::get_event(&state.pool, event_id).await?.is_empty() {
        return Err(ApiError::InternalError(format!(
            "Event {} still exists after delete",
            event_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
