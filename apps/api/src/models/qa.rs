use serde::{Deserialize, Serialize};

/// Number of Q&A pairs every successful generation must produce:
/// 3 technical + 2 HR, per the prompt contract.
pub const QA_SET_SIZE: usize = 5;

/// One interview question paired with a model answer.
///
/// Both fields are non-empty after trimming on every successful generation
/// path; the validator rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}
