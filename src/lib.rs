//! REST API for sports and events backed by SQLite, with best-effort team
//! logo enrichment for new events.

use sqlx::sqlite::SqlitePool;

pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod routes;
pub mod slug;

use enrichment::LogoClient;

/// Shared handler state. Both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub logos: LogoClient,
}
