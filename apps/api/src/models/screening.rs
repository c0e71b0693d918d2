use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// How a required skill was matched against the candidate's skill list.
/// Exact beats partial beats semantic — the scoring engine stops at the
/// first tier that hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    Semantic,
    None,
}

/// One record per required skill, created fresh on every scoring run and
/// never mutated afterward — a rescoring produces a new set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchRecord {
    pub skill: String,
    pub is_matched: bool,
    pub match_type: MatchType,
    /// 0.0–1.0
    pub confidence: f64,
}

/// Sub-scores and the fixed weights used to combine them.
/// Immutable once computed for a given scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0–100
    pub skill_score: f64,
    /// 0–100
    pub experience_score: f64,
    /// 0–100
    pub education_score: f64,
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub education_weight: f64,
}

impl ScoreBreakdown {
    pub const SKILL_WEIGHT: f64 = 0.7;
    pub const EXPERIENCE_WEIGHT: f64 = 0.2;
    pub const EDUCATION_WEIGHT: f64 = 0.1;

    pub fn new(skill_score: f64, experience_score: f64, education_score: f64) -> Self {
        Self {
            skill_score,
            experience_score,
            education_score,
            skill_weight: Self::SKILL_WEIGHT,
            experience_weight: Self::EXPERIENCE_WEIGHT,
            education_weight: Self::EDUCATION_WEIGHT,
        }
    }

    /// Weighted overall score, 0–100.
    pub fn weighted_overall(&self) -> f64 {
        self.skill_score * self.skill_weight
            + self.experience_score * self.experience_weight
            + self.education_score * self.education_weight
    }
}

/// Recommendation tier derived from the overall score.
///
/// The snake_case labels are a wire contract consumed verbatim by reporting
/// and dashboard collaborators — spelling and casing must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighlyRecommended,
    Recommended,
    Maybe,
    NotRecommended,
}

impl Recommendation {
    /// Threshold table. Cut points are inclusive: 75.0 is highly_recommended,
    /// 74.999 is recommended.
    pub fn from_score(overall_score: f64) -> Self {
        if overall_score >= 75.0 {
            Recommendation::HighlyRecommended
        } else if overall_score >= 60.0 {
            Recommendation::Recommended
        } else if overall_score >= 45.0 {
            Recommendation::Maybe
        } else {
            Recommendation::NotRecommended
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "highly_recommended",
            Recommendation::Recommended => "recommended",
            Recommendation::Maybe => "maybe",
            Recommendation::NotRecommended => "not_recommended",
        }
    }
}

/// Full result of screening one candidate against one job.
///
/// `final_score` is set only by the interview blend step — blending never
/// touches `overall_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    /// 0–100
    pub overall_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub skill_matches: Vec<SkillMatchRecord>,
    pub matched_skills_count: usize,
    pub total_required_skills: usize,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub final_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScreeningRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub overall_score: f64,
    /// `ScoreBreakdown` stored as JSONB.
    pub score_breakdown: Value,
    /// `Vec<SkillMatchRecord>` stored as JSONB.
    pub skill_matches: Value,
    pub matched_skills_count: i32,
    pub total_required_skills: i32,
    pub recommendation: String,
    pub interview_id: Option<Uuid>,
    pub interview_sentiment_score: Option<f64>,
    pub interview_confidence_score: Option<f64>,
    pub final_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_boundary_75_is_highly_recommended() {
        assert_eq!(
            Recommendation::from_score(75.0),
            Recommendation::HighlyRecommended
        );
    }

    #[test]
    fn test_recommendation_just_below_75_is_recommended() {
        assert_eq!(
            Recommendation::from_score(74.999),
            Recommendation::Recommended
        );
    }

    #[test]
    fn test_recommendation_boundary_60_is_recommended() {
        assert_eq!(Recommendation::from_score(60.0), Recommendation::Recommended);
    }

    #[test]
    fn test_recommendation_just_below_60_is_maybe() {
        assert_eq!(Recommendation::from_score(59.999), Recommendation::Maybe);
    }

    #[test]
    fn test_recommendation_boundary_45_is_maybe() {
        assert_eq!(Recommendation::from_score(45.0), Recommendation::Maybe);
    }

    #[test]
    fn test_recommendation_just_below_45_is_not_recommended() {
        assert_eq!(
            Recommendation::from_score(44.999),
            Recommendation::NotRecommended
        );
    }

    #[test]
    fn test_recommendation_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Recommendation::HighlyRecommended).unwrap(),
            "\"highly_recommended\""
        );
        assert_eq!(
            serde_json::to_string(&Recommendation::Recommended).unwrap(),
            "\"recommended\""
        );
        assert_eq!(
            serde_json::to_string(&Recommendation::Maybe).unwrap(),
            "\"maybe\""
        );
        assert_eq!(
            serde_json::to_string(&Recommendation::NotRecommended).unwrap(),
            "\"not_recommended\""
        );
    }

    #[test]
    fn test_match_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MatchType::Exact).unwrap(),
            "\"exact\""
        );
        assert_eq!(serde_json::to_string(&MatchType::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_weighted_overall_uses_fixed_weights() {
        let breakdown = ScoreBreakdown::new(100.0, 50.0, 0.0);
        // 0.7*100 + 0.2*50 + 0.1*0 = 80
        assert!((breakdown.weighted_overall() - 80.0).abs() < f64::EPSILON);
    }
}
