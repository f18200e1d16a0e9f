use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no credentials were found at startup. Evaluation and
    /// export still work; generation endpoints answer 503.
    pub llm: Option<Arc<dyn CompletionGateway>>,
    pub config: Config,
}

impl AppState {
    pub fn gateway(&self) -> Result<Arc<dyn CompletionGateway>, AppError> {
        self.llm.clone().ok_or_else(|| {
            AppError::Unavailable("No language model credentials configured".to_string())
        })
    }
}
