//! # stats-api
//!
//! HTTP server built with Axum framework: Slack event intake, the monthly
//! update trigger, leaderboard reads and health checks.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod slack;
pub mod state;

pub use server::{connect_database, create_app, create_app_state, run, run_server};
pub use state::AppState;
