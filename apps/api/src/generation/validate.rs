//! Shape validation of extracted LLM output.

use serde_json::Value;

use crate::generation::{FailureKind, GenerationFailure};
use crate::models::qa::{QaPair, QA_SET_SIZE};

const SHAPE_DETAIL: &str = "Expected 5 Q&A pairs";

/// Parses `json_text` and checks it is an array of exactly 5 objects, each
/// carrying non-empty string `question` and `answer` fields. Order is
/// preserved: the prompt asks for questions 1-3 technical and 4-5 HR, and
/// the UI relies on that ordering.
///
/// Wrong-typed fields are rejected, never coerced.
pub fn validate_qa_set(json_text: &str) -> Result<Vec<QaPair>, GenerationFailure> {
    let value: Value = serde_json::from_str(json_text)
        .map_err(|e| GenerationFailure::new(FailureKind::JsonParseError, e.to_string()))?;

    let items = value
        .as_array()
        .filter(|items| items.len() == QA_SET_SIZE)
        .ok_or_else(|| GenerationFailure::new(FailureKind::InvalidShape, SHAPE_DETAIL))?;

    items
        .iter()
        .map(|item| {
            let question = string_field(item, "question")?;
            let answer = string_field(item, "answer")?;
            Ok(QaPair { question, answer })
        })
        .collect()
}

fn string_field(item: &Value, key: &str) -> Result<String, GenerationFailure> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .ok_or_else(|| GenerationFailure::new(FailureKind::InvalidShape, SHAPE_DETAIL))
}
