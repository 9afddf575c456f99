//! Application state
//!
//! Holds the shared state for the Axum application.

use std::sync::Arc;

use stats_service::ServiceContext;

use crate::slack::SignatureVerifier;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    verifier: Option<Arc<SignatureVerifier>>,
}

impl AppState {
    /// Create a new AppState that accepts unsigned Slack requests
    pub fn new(service_context: ServiceContext) -> Self {
        Self {
            service_context: Arc::new(service_context),
            verifier: None,
        }
    }

    /// Require a valid Slack signature on event requests
    pub fn with_verifier(mut self, verifier: SignatureVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Slack signature verifier, if a signing secret is configured
    pub fn verifier(&self) -> Option<&SignatureVerifier> {
        self.verifier.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("verifier", &self.verifier)
            .finish()
    }
}
