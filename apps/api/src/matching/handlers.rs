//! Axum route handlers for screening: batch-rank candidates against a job
//! and serve persisted results.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranking::{rank_candidates, RankedCandidate};
use crate::models::candidate::{CandidateProfile, ResumeRow};
use crate::models::job::JobRow;
use crate::models::screening::{Recommendation, ScoreBreakdown, ScreeningRow, SkillMatchRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ScreenJobRequest {
    /// Specific resumes to screen; when empty, every parsed resume is screened.
    #[serde(default)]
    pub resume_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResultEntry {
    pub resume_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_skills: Vec<String>,
    pub overall_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub skill_matches: Vec<SkillMatchRecord>,
    pub matched_skills_count: usize,
    pub total_required_skills: usize,
    pub recommendation: Recommendation,
}

#[derive(Debug, Serialize)]
pub struct ScreenJobResponse {
    pub job_id: Uuid,
    pub job_title: String,
    pub total_candidates: usize,
    /// Ranked best-first.
    pub results: Vec<ScreeningResultEntry>,
    pub excellent_matches: usize,
    pub good_matches: usize,
    pub fair_matches: usize,
    pub low_matches: usize,
    pub average_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/screen
///
/// Runs the full screening pipeline: load candidates, score each against the
/// job requirement, rank, and upsert one screening row per candidate.
/// Rescreening overwrites — scores and matches are recomputed fresh and any
/// previous interview blend is cleared.
pub async fn handle_screen_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    request: Option<Json<ScreenJobRequest>>,
) -> Result<Json<ScreenJobResponse>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let resumes: Vec<ResumeRow> = if request.resume_ids.is_empty() {
        sqlx::query_as("SELECT * FROM resumes WHERE is_parsed")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM resumes WHERE is_parsed AND id = ANY($1)")
            .bind(&request.resume_ids)
            .fetch_all(&state.db)
            .await?
    };

    if resumes.is_empty() {
        return Err(AppError::Validation(
            "No parsed resumes found to screen".to_string(),
        ));
    }

    let mut candidates: Vec<(Uuid, CandidateProfile)> = Vec::with_capacity(resumes.len());
    for row in resumes {
        match serde_json::from_value::<CandidateProfile>(row.parsed_data.clone()) {
            Ok(profile) => candidates.push((row.id, profile)),
            Err(e) => tracing::warn!("Skipping resume {} with bad parsed_data: {e}", row.id),
        }
    }

    let requirement = job.requirement();
    let ranked = rank_candidates(candidates, &requirement, state.model.clone()).await;

    for candidate in &ranked {
        persist_screening(&state, job_id, candidate).await?;
    }

    tracing::info!(
        "Screened {} candidates for job {} ({})",
        ranked.len(),
        job.id,
        job.title
    );

    Ok(Json(build_response(job, ranked)))
}

/// GET /api/v1/jobs/:id/screenings
///
/// Persisted screening rows for a job, best score first.
pub async fn handle_get_screenings(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ScreeningRow>>, AppError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_one(&state.db)
        .await?;
    if exists == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let rows = sqlx::query_as::<_, ScreeningRow>(
        "SELECT * FROM screenings WHERE job_id = $1 ORDER BY overall_score DESC, created_at",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

async fn persist_screening(
    state: &AppState,
    job_id: Uuid,
    candidate: &RankedCandidate,
) -> Result<(), AppError> {
    let outcome = &candidate.outcome;
    let breakdown =
        serde_json::to_value(&outcome.score_breakdown).map_err(|e| AppError::Internal(e.into()))?;
    let matches =
        serde_json::to_value(&outcome.skill_matches).map_err(|e| AppError::Internal(e.into()))?;

    sqlx::query(
        "INSERT INTO screenings
            (id, job_id, resume_id, overall_score, score_breakdown, skill_matches,
             matched_skills_count, total_required_skills, recommendation)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         ON CONFLICT (job_id, resume_id) DO UPDATE SET
            overall_score = EXCLUDED.overall_score,
            score_breakdown = EXCLUDED.score_breakdown,
            skill_matches = EXCLUDED.skill_matches,
            matched_skills_count = EXCLUDED.matched_skills_count,
            total_required_skills = EXCLUDED.total_required_skills,
            recommendation = EXCLUDED.recommendation,
            interview_id = NULL,
            interview_sentiment_score = NULL,
            interview_confidence_score = NULL,
            final_score = NULL",
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(candidate.resume_id)
    .bind(outcome.overall_score)
    .bind(breakdown)
    .bind(matches)
    .bind(outcome.matched_skills_count as i32)
    .bind(outcome.total_required_skills as i32)
    .bind(outcome.recommendation.as_str())
    .execute(&state.db)
    .await?;

    Ok(())
}

fn build_response(job: JobRow, ranked: Vec<RankedCandidate>) -> ScreenJobResponse {
    let total = ranked.len();
    let scores: Vec<f64> = ranked.iter().map(|c| c.outcome.overall_score).collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    ScreenJobResponse {
        job_id: job.id,
        job_title: job.title,
        total_candidates: total,
        excellent_matches: scores.iter().filter(|s| **s >= 75.0).count(),
        good_matches: scores.iter().filter(|s| **s >= 60.0).count(),
        fair_matches: scores.iter().filter(|s| **s >= 45.0).count(),
        low_matches: scores.iter().filter(|s| **s < 45.0).count(),
        average_score,
        results: ranked
            .into_iter()
            .map(|candidate| ScreeningResultEntry {
                resume_id: candidate.resume_id,
                candidate_name: candidate.profile.name,
                candidate_email: candidate.profile.email,
                candidate_skills: candidate.profile.skills,
                overall_score: candidate.outcome.overall_score,
                score_breakdown: candidate.outcome.score_breakdown,
                skill_matches: candidate.outcome.skill_matches,
                matched_skills_count: candidate.outcome.matched_skills_count,
                total_required_skills: candidate.outcome.total_required_skills,
                recommendation: candidate.outcome.recommendation,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::screening::{MatchType, ScreeningOutcome};

    fn ranked(score: f64) -> RankedCandidate {
        RankedCandidate {
            resume_id: Uuid::new_v4(),
            profile: CandidateProfile::default(),
            outcome: ScreeningOutcome {
                overall_score: score,
                score_breakdown: ScoreBreakdown::new(score, 80.0, 80.0),
                skill_matches: vec![SkillMatchRecord {
                    skill: "Python".to_string(),
                    is_matched: score > 0.0,
                    match_type: MatchType::Exact,
                    confidence: 1.0,
                }],
                matched_skills_count: 1,
                total_required_skills: 1,
                recommendation: Recommendation::from_score(score),
                final_score: None,
            },
        }
    }

    fn job() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "desc".to_string(),
            required_skills: vec!["Python".to_string()],
            experience_requirement: String::new(),
            education_requirement: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_buckets_use_recommendation_cut_points() {
        let response = build_response(job(), vec![ranked(80.0), ranked(62.0), ranked(30.0)]);
        assert_eq!(response.total_candidates, 3);
        assert_eq!(response.excellent_matches, 1);
        assert_eq!(response.good_matches, 2); // >= 60 is cumulative
        assert_eq!(response.fair_matches, 2);
        assert_eq!(response.low_matches, 1);
        assert!((response.average_score - (80.0 + 62.0 + 30.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_results_preserve_ranked_order() {
        let first = ranked(90.0);
        let second = ranked(40.0);
        let first_id = first.resume_id;
        let response = build_response(job(), vec![first, second]);
        assert_eq!(response.results[0].resume_id, first_id);
    }
}
