//! Route definitions
//!
//! Slack webhooks at the root, JSON reads under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, leaderboards, slack};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(slack_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Slack-facing routes
fn slack_routes() -> Router<AppState> {
    Router::new()
        .route("/slack/events", post(slack::handle_events))
        .route("/slack/monthly-update", post(slack::monthly_update))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().route("/leaderboards/:period", get(leaderboards::get_leaderboard))
}
