//! # stats-service
//!
//! Application layer containing the reaction reconciler, leaderboard and
//! monthly report services, the report delivery port, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    IgnoreReason, LeaderboardService, MonthlyReport, MonthlyReportService, ReactionReconciler,
    ReconcileOutcome, ReconcilerConfig, RecordingPublisher, ReportBuilder, ReportPublisher,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
