//! Report delivery port
//!
//! The service layer never talks to the chat platform directly; the binary
//! injects a concrete publisher through [`ServiceContext`](super::ServiceContext).

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ServiceError, ServiceResult};
use super::report::MonthlyReport;

/// Outbound delivery of a monthly report
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    /// Deliver the report. Failures map to `ServiceError::External`.
    async fn publish(&self, report: &MonthlyReport) -> ServiceResult<()>;
}

/// Publisher that keeps reports in memory instead of delivering them
///
/// Used by tests and local runs without chat credentials.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<MonthlyReport>>,
    failure: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every delivery fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            published: Mutex::default(),
            failure: Some(reason.into()),
        }
    }

    /// Reports delivered so far, oldest first
    pub fn published(&self) -> Vec<MonthlyReport> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl ReportPublisher for RecordingPublisher {
    async fn publish(&self, report: &MonthlyReport) -> ServiceResult<()> {
        if let Some(reason) = &self.failure {
            return Err(ServiceError::external(reason.clone()));
        }
        self.published.lock().push(report.clone());
        Ok(())
    }
}
