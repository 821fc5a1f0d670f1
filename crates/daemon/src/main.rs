//! MoveOps Server - Main Entry Point
//! HTTP API over a local SQLite database

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use moveops_api_http::{AppState, HttpServer};
use moveops_core::application::MoveExecutionService;
use moveops_core::port::SystemTimeProvider;
use moveops_infra_sqlite::{create_pool, run_migrations, seed, SqliteMoveRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (.env is optional)
    let dotenv_loaded = dotenvy::dotenv().ok();
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let _log_guard = telemetry::init_logging(&config)?;

    info!("MoveOps server v{} starting...", VERSION);
    if let Some(path) = dotenv_loaded {
        info!(path = %path.display(), "Loaded environment file");
    }

    // 3. Initialize database
    info!(database = %config.database, "Initializing database...");
    config.prepare_storage()?;
    let pool = create_pool(&config.database)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    if config.seed_demo {
        if seed::is_empty(&pool).await? {
            seed::load_demo_data(&pool)
                .await
                .context("Loading demo data failed")?;
        } else {
            info!("Database already has deals, skipping demo data");
        }
    }

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let repo = Arc::new(SqliteMoveRepository::new(pool.clone()));
    let service = Arc::new(MoveExecutionService::new(
        repo.clone(),
        repo,
        time_provider,
    ));

    // 5. Start HTTP server
    let server = HttpServer::bind(&config.server, AppState::new(service))
        .await
        .context("HTTP server start failed")?;
    info!(addr = %server.local_addr()?, "System ready");
    info!("Press Ctrl+C to shutdown");

    server.run(shutdown_signal()).await?;

    // 6. Close database
    pool.close().await;
    info!("Shutdown complete.");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Shutdown signal received (Ctrl+C). Exiting gracefully..."),
        () = terminate => info!("Shutdown signal received (SIGTERM). Exiting gracefully..."),
    }
}
