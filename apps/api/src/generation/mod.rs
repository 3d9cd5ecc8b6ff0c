// Interview Q&A generation pipeline.
// Implements: prompt building, JSON extraction, shape validation, orchestration.
// All LLM calls go through llm_client — no direct backend calls here.

pub mod engine;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod validate;

use thiserror::Error;

/// Category of a generation failure. Every failure the pipeline can produce
/// maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network-level failure or timeout reaching the backend.
    TransportFailure,
    /// Backend answered with a non-2xx status.
    NonSuccessStatus,
    /// Backend-reported error (quota, malformed envelope, empty response).
    ProviderError,
    /// Extracted text was not valid JSON.
    JsonParseError,
    /// JSON parsed but was not an array of exactly 5 Q&A objects.
    InvalidShape,
    /// Catch-all; detail is logged, never shown raw to the caller.
    UnexpectedError,
}

/// A failed generation: a tagged kind plus a human-readable detail.
///
/// This replaces the older convention of smuggling errors through a fake
/// Q&A pair; callers branch on `kind` instead of sniffing question text.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {detail}")]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl GenerationFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}
