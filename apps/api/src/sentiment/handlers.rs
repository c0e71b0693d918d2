//! Axum route handlers for interviews: transcript intake, analysis, and the
//! final-score blend into existing screenings.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::scoring::blend_final_score;
use crate::models::interview::{InterviewRow, SentimentOutcome};
use crate::sentiment::analyzer::analyze_transcript;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub resume_id: Uuid,
    /// Transcript text — transcription happens upstream of this API.
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewAnalysisResponse {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub analysis: SentimentOutcome,
    pub is_analyzed: bool,
    /// Screenings whose final score was re-blended with this analysis.
    pub screenings_updated: usize,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Stores a transcript for a known resume. Analysis is a separate step.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<Json<InterviewRow>, AppError> {
    if request.transcript.trim().is_empty() {
        return Err(AppError::Validation(
            "transcript cannot be empty".to_string(),
        ));
    }

    let resume_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resumes WHERE id = $1")
            .bind(request.resume_id)
            .fetch_one(&state.db)
            .await?;
    if resume_exists == 0 {
        return Err(AppError::NotFound(format!(
            "Resume {} not found",
            request.resume_id
        )));
    }

    let row = sqlx::query_as::<_, InterviewRow>(
        "INSERT INTO interviews (id, resume_id, transcript, is_analyzed)
         VALUES ($1, $2, $3, FALSE)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(request.resume_id)
    .bind(&request.transcript)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// POST /api/v1/interviews/:id/analyze
///
/// Runs sentiment/confidence analysis on the stored transcript, replaces any
/// previous analysis on the interview, and blends the result into every
/// screening of the candidate. The blend writes `final_score` only — the
/// resume-only `overall_score` is never touched.
pub async fn handle_analyze_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewAnalysisResponse>, AppError> {
    let interview = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(interview_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    let transcript = interview.transcript.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity("Interview has no transcript to analyze".to_string())
    })?;

    let analysis = analyze_transcript(transcript, state.model.as_ref()).await;
    let analysis_json =
        serde_json::to_value(&analysis).map_err(|e| AppError::Internal(e.into()))?;

    sqlx::query("UPDATE interviews SET analysis = $2, is_analyzed = TRUE WHERE id = $1")
        .bind(interview_id)
        .bind(&analysis_json)
        .execute(&state.db)
        .await?;

    let screenings_updated =
        blend_into_screenings(&state, interview.resume_id, interview_id, &analysis).await?;

    tracing::info!(
        "Analyzed interview {} for resume {}: sentiment {:?}, {} screenings blended",
        interview_id,
        interview.resume_id,
        analysis.overall_sentiment,
        screenings_updated
    );

    Ok(Json(InterviewAnalysisResponse {
        id: interview.id,
        resume_id: interview.resume_id,
        analysis,
        is_analyzed: true,
        screenings_updated,
        created_at: interview.created_at,
    }))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(interview_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    Ok(Json(row))
}

/// Applies the interview blend to every screening of the candidate.
async fn blend_into_screenings(
    state: &AppState,
    resume_id: Uuid,
    interview_id: Uuid,
    analysis: &SentimentOutcome,
) -> Result<usize, AppError> {
    let overall_scores: Vec<(Uuid, f64)> = sqlx::query_as(
        "SELECT id, overall_score FROM screenings WHERE resume_id = $1",
    )
    .bind(resume_id)
    .fetch_all(&state.db)
    .await?;

    for (screening_id, overall_score) in &overall_scores {
        let final_score = blend_final_score(
            *overall_score,
            analysis.sentiment_score,
            analysis.confidence_score,
        );
        sqlx::query(
            "UPDATE screenings SET
                interview_id = $2,
                interview_sentiment_score = $3,
                interview_confidence_score = $4,
                final_score = $5
             WHERE id = $1",
        )
        .bind(screening_id)
        .bind(interview_id)
        .bind(analysis.sentiment_score)
        .bind(analysis.confidence_score)
        .bind(final_score)
        .execute(&state.db)
        .await?;
    }

    Ok(overall_scores.len())
}
