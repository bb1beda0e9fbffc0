#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use sports_events_api::config::LookupConfig;
use sports_events_api::enrichment::LogoClient;
use sports_events_api::{db, routes, AppState};

pub const ARSENAL_LOGO: &str = "https://logos.test/arsenal.png";
pub const CHELSEA_LOGO: &str = "https://logos.test/chelsea.png";
pub const FLAKY_LOGO: &str = "https://logos.test/flaky.png";

#[derive(Clone, Default)]
struct FakeLookup {
    hits: Arc<AtomicUsize>,
    flaky_calls: Arc<AtomicUsize>,
}

/// Stand-in for the third-party team search, answering by team name
pub struct LookupServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl LookupServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> LookupConfig {
        LookupConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(500),
            max_retries: 1,
            retry_delay: Duration::from_millis(10),
            rate_limit_delay: Duration::from_millis(10),
        }
    }

    pub fn client(&self) -> LogoClient {
        LogoClient::new(&self.config()).unwrap()
    }
}

fn found(logo: &str) -> Response {
    Json(json!({"teams": [{"strTeamLogo": logo, "strTeam": "whatever"}]})).into_response()
}

async fn search_teams(
    State(fake): State<FakeLookup>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);

    match params.get("t").map(String::as_str).unwrap_or_default() {
        "Arsenal" => found(ARSENAL_LOGO),
        "Chelsea" => found(CHELSEA_LOGO),
        "Blank" => found(""),
        "Broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "Garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "Flaky" => {
            if fake.flaky_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                StatusCode::TOO_MANY_REQUESTS.into_response()
            } else {
                found(FLAKY_LOGO)
            }
        }
        "Slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            found(ARSENAL_LOGO)
        }
        _ => Json(json!({"teams": null})).into_response(),
    }
}

pub async fn spawn_lookup_server() -> LookupServer {
    let fake = FakeLookup::default();
    let hits = fake.hits.clone();

    let app = Router::new()
        .route("/searchteams.php", get(search_teams))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LookupServer {
        base_url: format!("http://{}/searchteams.php", addr),
        hits,
    }
}

pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::ensure_schema(&pool).await.unwrap();
    pool
}

pub async fn test_app(lookup: &LookupServer) -> Router {
    routes::router(AppState {
        pool: test_pool().await,
        logos: lookup.client(),
    })
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}
