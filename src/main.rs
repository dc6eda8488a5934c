//! House Points Server - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations (or fall back to
//!    the in-memory store when no `DATABASE_URL` is set)
//! 3. Seed the four houses if the store is empty
//! 4. Build HTTP router with routes and middleware
//! 5. Serve until Ctrl-C

use house_points_server::{
    app::{AppState, create_router},
    config::Config,
    db,
    services::seed,
    store::{MemoryStore, PgStore, PointsStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            serve(PgStore::new(pool), &config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            serve(MemoryStore::new(), &config).await
        }
    }
}

async fn serve<S: PointsStore>(store: S, config: &Config) -> anyhow::Result<()> {
    seed::seed_houses(&store).await?;

    if config.admin_api_key.is_none() {
        tracing::warn!("ADMIN_API_KEY not set, mutating endpoints are unauthenticated");
    }

    let app = create_router(AppState::from_config(store, config));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
