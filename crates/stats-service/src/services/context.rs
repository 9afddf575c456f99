//! Service context - dependency container for services
//!
//! Holds the member store, the report publisher and reconciler settings.

use std::sync::Arc;

use stats_core::traits::MemberRepository;

use super::error::{ServiceError, ServiceResult};
use super::publisher::ReportPublisher;
use super::reconciler::ReconcilerConfig;

/// Service context containing all dependencies
///
/// Cheap to clone; every handler and spawned task gets its own copy.
#[derive(Clone)]
pub struct ServiceContext {
    member_repo: Arc<dyn MemberRepository>,
    publisher: Arc<dyn ReportPublisher>,
    reconciler_config: Arc<ReconcilerConfig>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        publisher: Arc<dyn ReportPublisher>,
        reconciler_config: ReconcilerConfig,
    ) -> Self {
        Self {
            member_repo,
            publisher,
            reconciler_config: Arc::new(reconciler_config),
        }
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the report publisher
    pub fn publisher(&self) -> &dyn ReportPublisher {
        self.publisher.as_ref()
    }

    pub fn reconciler_config(&self) -> &ReconcilerConfig {
        &self.reconciler_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("member_repo", &"dyn MemberRepository")
            .field("publisher", &"dyn ReportPublisher")
            .field("reconciler_config", &self.reconciler_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    publisher: Option<Arc<dyn ReportPublisher>>,
    reconciler_config: Option<ReconcilerConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn ReportPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn reconciler_config(mut self, config: ReconcilerConfig) -> Self {
        self.reconciler_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// Reconciler settings fall back to [`ReconcilerConfig::default`].
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.publisher
                .ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.reconciler_config.unwrap_or_default(),
        ))
    }
}
