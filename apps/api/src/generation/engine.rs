//! Orchestrates one generation call: build prompt → call backend → extract
//! JSON → validate shape.
//!
//! These functions never panic and never return partial results: the outcome
//! is either all 5 pairs or a single tagged failure. Repeated calls with the
//! same input are independent backend calls, so outputs differ between runs;
//! only the structure is stable.

use crate::generation::extract::extract_json_array;
use crate::generation::prompts::{build_resume_prompt, build_role_prompt};
use crate::generation::validate::validate_qa_set;
use crate::generation::{FailureKind, GenerationFailure};
use crate::llm_client::{CompletionError, CompletionProvider};
use crate::models::qa::QaPair;

/// Generates 5 interview Q&A pairs (3 technical + 2 HR) for a job role.
pub async fn generate_for_role(
    provider: &dyn CompletionProvider,
    role: &str,
) -> Result<Vec<QaPair>, GenerationFailure> {
    run_pipeline(provider, build_role_prompt(role)).await
}

/// Generates 5 interview Q&A pairs tailored to extracted resume text.
pub async fn generate_for_resume(
    provider: &dyn CompletionProvider,
    resume_text: &str,
) -> Result<Vec<QaPair>, GenerationFailure> {
    run_pipeline(provider, build_resume_prompt(resume_text)).await
}

async fn run_pipeline(
    provider: &dyn CompletionProvider,
    prompt: String,
) -> Result<Vec<QaPair>, GenerationFailure> {
    let raw = provider
        .complete(&prompt)
        .await
        .map_err(GenerationFailure::from)?;

    let candidate = extract_json_array(&raw);
    validate_qa_set(&candidate)
}

impl From<CompletionError> for GenerationFailure {
    fn from(e: CompletionError) -> Self {
        let kind = match &e {
            CompletionError::Timeout | CompletionError::Transport(_) => {
                FailureKind::TransportFailure
            }
            CompletionError::Status { .. } => FailureKind::NonSuccessStatus,
            CompletionError::Provider(_) | CompletionError::EmptyResponse => {
                FailureKind::ProviderError
            }
        };
        GenerationFailure::new(kind, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Backend stub returning a canned outcome for every prompt.
    struct StubProvider {
        outcome: Result<String, fn() -> CompletionError>,
    }

    impl StubProvider {
        fn text(text: &str) -> Self {
            Self {
                outcome: Ok(text.to_string()),
            }
        }

        fn failing(make: fn() -> CompletionError) -> Self {
            Self { outcome: Err(make) }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            match &self.outcome {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn fenced_payload(count: usize) -> String {
        let items: Vec<String> = (1..=count)
            .map(|i| format!(r#"{{"question": "Q{i}", "answer": "A{i}"}}"#))
            .collect();
        format!("```json\n[{}]\n```", items.join(","))
    }

    #[tokio::test]
    async fn test_fenced_backend_output_yields_five_pairs() {
        let provider = StubProvider::text(&fenced_payload(5));
        let pairs = generate_for_role(&provider, "Software Engineer")
            .await
            .unwrap();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0].question, "Q1");
        assert_eq!(pairs[0].answer, "A1");
    }

    #[tokio::test]
    async fn test_prose_without_json_fails_as_parse_error() {
        let provider = StubProvider::text("I'm unable to help with that request.");
        let err = generate_for_role(&provider, "Software Engineer")
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::JsonParseError);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_transport_failure() {
        let provider = StubProvider::failing(|| CompletionError::Timeout);
        let err = generate_for_role(&provider, "Data Scientist")
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::TransportFailure);
        assert!(err.detail.contains("timed out"));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_its_own_kind() {
        let provider = StubProvider::failing(|| CompletionError::Status {
            status: 404,
            message: "model not found".into(),
        });
        let err = generate_for_role(&provider, "Data Scientist")
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::NonSuccessStatus);
    }

    #[tokio::test]
    async fn test_provider_error_maps_to_provider_kind() {
        let provider = StubProvider::failing(|| CompletionError::Provider("quota exceeded".into()));
        let err = generate_for_resume(&provider, "ten years of Rust")
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::ProviderError);
    }

    // All-or-nothing: a 4-element payload is a shape failure, never a
    // partial result.
    #[tokio::test]
    async fn test_undersized_payload_is_rejected_whole() {
        let provider = StubProvider::text(&fenced_payload(4));
        let err = generate_for_role(&provider, "Software Engineer")
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidShape);
    }
}
