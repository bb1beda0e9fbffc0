use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sports_events_api::config::Config;
use sports_events_api::enrichment::LogoClient;
use sports_events_api::error::StartupError;
use sports_events_api::{db, routes, AppState};

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG from it reaches the filter
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api server...");

    if let Err(e) = run().await {
        tracing::error!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::ensure_schema(&pool).await?;

    tracing::info!("Database connection established.");

    let logos = LogoClient::new(&config.lookup)?;
    let app = routes::router(AppState { pool, logos });

    let addr = SocketAddr::from((config.host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
