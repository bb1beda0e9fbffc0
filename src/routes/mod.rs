use axum::{
    extract::rejection::JsonRejection,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, FieldError};
use crate::AppState;

pub mod events;
pub mod health;
pub mod sports;

/// `{"message": ...}` envelope
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Turn a body that is not JSON at all into a validation error
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::Validation(vec![FieldError::new("body", rejection.body_text())]))
}

pub fn router(state: AppState) -> Router {
    // Any origin is accepted; tighten for production deployments
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Sport endpoints
        .route("/sport", get(sports::list_sports).post(sports::create_sport))
        .route("/sport/", get(sports::list_sports).post(sports::create_sport))
        .route(
            "/sport/{id}",
            get(sports::get_sport)
                .patch(sports::update_sport)
                .delete(sports::delete_sport),
        )

        // Event endpoints
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/", get(events::list_events).post(events::create_event))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        );

    Router::new()
        .route("/", get(|| async { "Sports & Events API - v1.0" }))
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
