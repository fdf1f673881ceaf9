use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The model gateway behind a trait object so tests can substitute a mock.
    pub gateway: Arc<dyn ModelGateway>,
    pub config: Config,
}
