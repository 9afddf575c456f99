//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use stats_common::{AppConfig, AppError};
use stats_db::{create_pool, run_migrations, PgMemberRepository, PgPool};
use stats_service::{ReconcilerConfig, ServiceContextBuilder};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::slack::{SignatureVerifier, SlackPublisher};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Connect to PostgreSQL and apply pending migrations
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = stats_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;

    Ok(pool)
}

/// Wire the PostgreSQL store and Slack delivery into an AppState
pub fn create_app_state(config: &AppConfig, pool: PgPool) -> Result<AppState, AppError> {
    let publisher = SlackPublisher::new(&config.slack)
        .map_err(|e| AppError::Config(format!("Failed to build Slack client: {e}")))?;

    let service_context = ServiceContextBuilder::new()
        .member_repo(Arc::new(PgMemberRepository::new(pool)))
        .publisher(Arc::new(publisher))
        .reconciler_config(ReconcilerConfig::from(&config.reconciler))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let state = AppState::new(service_context);
    match &config.slack.signing_secret {
        Some(secret) => {
            let verifier = SignatureVerifier::new(secret)
                .map_err(|e| AppError::Config(format!("Invalid Slack signing secret: {e}")))?;
            Ok(state.with_verifier(verifier))
        }
        None => {
            warn!("SLACK_SIGNING_SECRET not set, Slack requests are not verified");
            Ok(state)
        }
    }
}

/// Run the HTTP server until Ctrl+C / SIGTERM
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let pool = connect_database(&config).await?;

    let state = create_app_state(&config, pool.clone())?;
    let app = create_app(state);

    let result = run_server(app, &config.api.address()).await;

    pool.close().await;
    info!("Database pool closed");

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
