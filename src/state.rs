use std::sync::Arc;

use crate::config::Config;
use crate::llm::GeminiClient;

/// Shared state for the axum handlers: the startup configuration and the
/// Gemini client built from it. Everything request-scoped (selection,
/// upload, result) lives in the request itself, so there is nothing mutable
/// to share across sessions.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: Arc<GeminiClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(&config);
        AppState {
            config: Arc::new(config),
            gemini: Arc::new(gemini),
        }
    }
}
