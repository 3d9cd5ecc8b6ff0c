use std::sync::Arc;

use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The two generation paths use different backends (a local Ollama model for
/// role-based generation, Gemini for resume-based generation), so the state
/// carries one provider per path. Both are plain `CompletionProvider` trait
/// objects; handlers never know which backend sits behind them.
#[derive(Clone)]
pub struct AppState {
    pub role_provider: Arc<dyn CompletionProvider>,
    pub resume_provider: Arc<dyn CompletionProvider>,
}
