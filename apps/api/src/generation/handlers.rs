//! Axum route handlers for the Q&A generation API.
//!
//! Input validation lives here and fails fast with 400 before any LLM call.
//! Generation failures come back as a tagged `GenerationFailure` and are
//! mapped to 500 responses.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::engine::{generate_for_resume, generate_for_role};
use crate::generation::{FailureKind, GenerationFailure};
use crate::models::qa::QaPair;
use crate::resume::extract_resume_text;
use crate::state::AppState;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];
const MIN_RESUME_CHARS: usize = 50;
const MIN_ROLE_CHARS: usize = 2;
const MAX_ROLE_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsParams {
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleQuestionsResponse {
    pub role: String,
    pub questions_and_answers: Vec<QaPair>,
    pub total_questions: usize,
    pub status: String,
    #[serde(rename = "type")]
    pub response_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeQuestionsResponse {
    pub filename: String,
    pub questions_and_answers: Vec<QaPair>,
    pub total_questions: usize,
    pub status: String,
    #[serde(rename = "type")]
    pub response_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /generate_questions?role=...
///
/// Generates 5 interview questions (3 technical + 2 HR) for a job role.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Query(params): Query<GenerateQuestionsParams>,
) -> Result<Json<RoleQuestionsResponse>, AppError> {
    let role = validate_role(&params.role)?;

    info!("Generating questions for role: {role}");
    let pairs = generate_for_role(state.role_provider.as_ref(), &role)
        .await
        .map_err(failure_to_app_error)?;
    info!("Successfully generated {} questions for {role}", pairs.len());

    Ok(Json(RoleQuestionsResponse {
        role,
        total_questions: pairs.len(),
        questions_and_answers: pairs,
        status: "success".to_string(),
        response_type: "role_based".to_string(),
    }))
}

/// POST /generate_questions_from_resume
///
/// Accepts a multipart upload (`file` field, .pdf/.docx/.txt), extracts the
/// resume text, and generates 5 interview questions tailored to it.
pub async fn handle_generate_from_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeQuestionsResponse>, AppError> {
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart upload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let extension = file_extension(&filename);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported file type. Allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    info!("Processing resume file: {filename}");
    let resume_text = extract_resume_text(&data, &filename);

    if resume_text.trim().len() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume text is too short or empty. Please upload a valid resume.".to_string(),
        ));
    }
    info!("Extracted {} characters from resume", resume_text.len());

    let pairs = generate_for_resume(state.resume_provider.as_ref(), &resume_text)
        .await
        .map_err(failure_to_app_error)?;
    info!("Successfully generated {} questions from resume", pairs.len());

    Ok(Json(ResumeQuestionsResponse {
        filename,
        total_questions: pairs.len(),
        questions_and_answers: pairs,
        status: "success".to_string(),
        response_type: "resume_based".to_string(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_role(raw: &str) -> Result<String, AppError> {
    let role = raw.trim();
    if role.is_empty() {
        return Err(AppError::Validation("Role cannot be empty".to_string()));
    }
    if role.chars().count() < MIN_ROLE_CHARS {
        return Err(AppError::Validation(
            "Role must be at least 2 characters long".to_string(),
        ));
    }
    if role.chars().count() > MAX_ROLE_CHARS {
        return Err(AppError::Validation(
            "Role must be at most 100 characters long".to_string(),
        ));
    }
    Ok(role.to_string())
}

fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn failure_to_app_error(failure: GenerationFailure) -> AppError {
    match failure.kind {
        // Catch-all failures keep their detail in the logs only.
        FailureKind::UnexpectedError => AppError::Internal(anyhow::anyhow!(failure.detail)),
        _ => AppError::Generation(failure.detail),
    }
}
