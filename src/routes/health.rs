use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::{db, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: String,
    timestamp: i64,
}

// GET /health - Liveness plus a one-statement database probe
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match db::fetch_one(&state.pool, "SELECT 1 AS ok", &[]).await {
        Ok(_) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            tracing::error!("Health check database probe failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    let response = HealthResponse {
        status: if status.is_success() { "ok".to_string() } else { "degraded".to_string() },
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    (status, Json(response))
}
