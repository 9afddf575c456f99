//! Business logic services
//!
//! Reaction reconciliation, leaderboard aggregation and monthly reporting,
//! all driven through a shared [`ServiceContext`].

pub mod context;
pub mod error;
pub mod leaderboard;
pub mod monthly;
pub mod publisher;
pub mod reconciler;
pub mod report;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use leaderboard::LeaderboardService;
pub use monthly::MonthlyReportService;
pub use publisher::{RecordingPublisher, ReportPublisher};
pub use reconciler::{
    IgnoreReason, ReactionReconciler, ReconcileOutcome, ReconcilerConfig, MAX_RESOLVE_ATTEMPTS,
};
pub use report::{MonthlyReport, ReportBuilder, REPORT_HEADING};
