//! Axum route handlers for resume and job ingestion.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::job::extract_requirement;
use crate::extraction::resume::extract_profile;
use crate::models::candidate::{CandidateProfile, ResumeRow};
use crate::models::job::{JobRequirement, JobRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub id: Uuid,
    pub file_name: String,
    pub is_parsed: bool,
    pub parsed_data: CandidateProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub parsed_data: CandidateProfile,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseJobRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJobResponse {
    pub requirement: JobRequirement,
}

// ────────────────────────────────────────────────────────────────────────────
// Resume handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Multipart upload: a `file` part carrying a PDF, or a `text` part carrying
/// pre-extracted text. The resume is parsed immediately and stored with its
/// extracted profile.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut file_name = String::new();
    let mut raw_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                let text = pdf_extract::extract_text_from_mem(&data).map_err(|e| {
                    AppError::UnprocessableEntity(format!("Could not extract text from PDF: {e}"))
                })?;
                raw_text = Some(text);
            }
            Some("text") => {
                if file_name.is_empty() {
                    file_name = "resume.txt".to_string();
                }
                raw_text = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read text field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let raw_text = raw_text
        .ok_or_else(|| AppError::Validation("A 'file' or 'text' part is required".to_string()))?;
    if raw_text.trim().is_empty() {
        // Upstream extraction failure — nothing for the parser to work with.
        return Err(AppError::UnprocessableEntity(
            "Could not extract any text from resume".to_string(),
        ));
    }

    let profile = extract_profile(&raw_text);
    let parsed_data =
        serde_json::to_value(&profile).map_err(|e| AppError::Internal(e.into()))?;

    let row = sqlx::query_as::<_, ResumeRow>(
        "INSERT INTO resumes (id, file_name, raw_text, parsed_data, is_parsed)
         VALUES ($1, $2, $3, $4, TRUE)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&file_name)
    .bind(&raw_text)
    .bind(&parsed_data)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Parsed resume {} ({}): {} skills extracted",
        row.id,
        row.file_name,
        profile.skills.len()
    );

    Ok(Json(ResumeUploadResponse {
        id: row.id,
        file_name: row.file_name,
        is_parsed: row.is_parsed,
        parsed_data: profile,
        created_at: row.created_at,
    }))
}

/// POST /api/v1/resumes/parse
///
/// Extraction preview: parses raw text without persisting anything.
pub async fn handle_parse_resume(
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    Ok(Json(ParseResumeResponse {
        parsed_data: extract_profile(&request.raw_text),
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Job handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
///
/// Creates a job posting; requirements are extracted from the description at
/// creation time so screening never re-parses.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let requirement = extract_requirement(&request.description);

    let row = sqlx::query_as::<_, JobRow>(
        "INSERT INTO jobs (id, title, description, required_skills, experience_requirement, education_requirement)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&requirement.required_skills)
    .bind(&requirement.experience_requirement)
    .bind(&requirement.education_requirement)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Created job {} ({}): {} required skills",
        row.id,
        row.title,
        row.required_skills.len()
    );

    Ok(Json(row))
}

/// POST /api/v1/jobs/parse
///
/// Requirement-extraction preview, no persistence.
pub async fn handle_parse_job(
    Json(request): Json<ParseJobRequest>,
) -> Result<Json<ParseJobResponse>, AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    Ok(Json(ParseJobResponse {
        requirement: extract_requirement(&request.description),
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(row))
}
