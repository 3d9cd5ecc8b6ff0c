// All LLM prompt constants for the Generation module.
//
// Inputs are embedded verbatim — no sanitization here. The text lands inside
// a natural-language prompt, not a JSON literal, so newlines, unicode, and
// JSON-special characters in a role or resume are all fine. Length and
// character checks are the boundary layer's job.

/// Role-based prompt template. Replace `{role}` before sending.
pub const ROLE_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer.

Generate exactly 5 realistic interview questions and answers for the job role: {role}.

Make 3 technical and 2 HR-based.

Return ONLY a JSON array with no surrounding prose, formatted like:
[
    {
        "question": "...",
        "answer": "..."
    },
    {
        "question": "...",
        "answer": "..."
    },
    {
        "question": "...",
        "answer": "..."
    },
    {
        "question": "...",
        "answer": "..."
    },
    {
        "question": "...",
        "answer": "..."
    }
]"#;

/// Resume-based prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer.

Based on the resume below, generate exactly 5 realistic interview questions and answers tailored to the candidate's skills, projects, and experience.

Make 3 technical and 2 HR-based.

Return ONLY a JSON array with no surrounding prose, where each element is an object with "question" and "answer" string fields.

RESUME:
{resume_text}"#;

/// Builds the instruction prompt for role-based generation.
pub fn build_role_prompt(role: &str) -> String {
    ROLE_PROMPT_TEMPLATE.replace("{role}", role)
}

/// Builds the instruction prompt for resume-based generation.
pub fn build_resume_prompt(resume_text: &str) -> String {
    RESUME_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_prompt_embeds_role_verbatim() {
        let prompt = build_role_prompt("Software Engineer");
        assert!(prompt.contains("job role: Software Engineer"));
        assert!(prompt.contains("exactly 5"));
        assert!(prompt.contains("3 technical and 2 HR"));
    }

    #[test]
    fn test_resume_prompt_tolerates_json_special_characters() {
        let resume = "Built {\"json\": [1, 2]} parsers\nand \"quoted\" pipelines, naïve résumé";
        let prompt = build_resume_prompt(resume);
        assert!(prompt.contains(resume));
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(build_role_prompt("QA"), build_role_prompt("QA"));
    }
}
