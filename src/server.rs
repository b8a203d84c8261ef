//! HTTP server initialization and runtime setup.
//!
//! Selects the link store, applies migrations and runs the Axum server until
//! a shutdown signal arrives.

use crate::config::Config;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::persistence::{MemoryShortLinkRepository, PgShortLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store
/// - Application state (services, admin credentials)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository: Arc<dyn ShortLinkRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = connect(&config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgShortLinkRepository::new(Arc::new(pool)))
        }
        None => {
            tracing::warn!("No database configured, links are kept in memory");
            Arc::new(MemoryShortLinkRepository::new())
        }
    };

    let state = AppState::from_config(repository, &config);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens a PostgreSQL pool using the configured pool settings.
pub async fn connect(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            listener_failed("Ctrl-C", e).await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => listener_failed("SIGTERM", e).await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Logs a signal listener that could not be registered and never completes,
/// leaving shutdown to the remaining listeners.
async fn listener_failed(signal: &str, error: impl std::fmt::Display) {
    tracing::error!("Failed to listen for {}: {}", signal, error);
    std::future::pending::<()>().await;
}
