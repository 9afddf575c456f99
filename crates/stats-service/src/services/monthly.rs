//! Monthly report service
//!
//! Composes leaderboard computation, report building and delivery.

use tracing::{info, instrument};

use stats_core::value_objects::Period;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::leaderboard::LeaderboardService;
use super::report::{MonthlyReport, ReportBuilder};

/// Monthly report service
pub struct MonthlyReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MonthlyReportService<'a> {
    /// Create a new MonthlyReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the report for `period` without delivering it
    pub async fn build(&self, period: Period) -> ServiceResult<MonthlyReport> {
        let leaderboard = LeaderboardService::new(self.ctx).compute(period).await?;
        Ok(ReportBuilder::build(&leaderboard))
    }

    /// Build and deliver the report for `period`
    ///
    /// Nothing is published when the period has no activity.
    #[instrument(skip(self))]
    pub async fn publish_for(&self, period: Period) -> ServiceResult<MonthlyReport> {
        let report = self.build(period).await?;
        self.ctx.publisher().publish(&report).await?;

        info!(period = %period, "Monthly report published");
        Ok(report)
    }
}
