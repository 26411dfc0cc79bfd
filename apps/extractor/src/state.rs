use std::sync::Arc;

use crate::workflow::Workflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Orchestration core with its process-wide collaborator clients.
    pub workflow: Arc<Workflow>,
}
