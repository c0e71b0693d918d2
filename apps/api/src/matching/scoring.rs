//! Scoring engine — computes the skill/experience/education breakdown and the
//! weighted overall score for one candidate against one job.
//!
//! Skill matching runs three tiers per required skill, first hit wins:
//! exact (weight 1.0) → substring partial (0.8) → semantic via embeddings
//! (weight = cosine similarity, accepted at ≥ 0.6). A missing embedding model
//! silently skips the semantic tier — never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model_client::{cosine_similarity, ModelProvider};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRequirement;
use crate::models::screening::{
    MatchType, Recommendation, ScoreBreakdown, ScreeningOutcome, SkillMatchRecord,
};

pub const SEMANTIC_MATCH_THRESHOLD: f64 = 0.6;
const PARTIAL_MATCH_CONFIDENCE: f64 = 0.8;

/// Blend weights applied once interview analysis exists. Touches only the
/// final score — the resume-only overall score is never rewritten.
const BLEND_RESUME_WEIGHT: f64 = 0.6;
const BLEND_SENTIMENT_WEIGHT: f64 = 0.2;
const BLEND_CONFIDENCE_WEIGHT: f64 = 0.2;

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());

/// Scores one candidate against one job requirement.
pub async fn score_candidate(
    profile: &CandidateProfile,
    requirement: &JobRequirement,
    provider: &dyn ModelProvider,
) -> ScreeningOutcome {
    let (skill_matches, skill_score) =
        match_skills(&profile.skills, &requirement.required_skills, provider).await;

    let experience_score = score_experience(
        &profile.experience,
        profile.estimated_years_of_experience,
        &requirement.experience_requirement,
    );
    let education_score = score_education(&profile.education, &requirement.education_requirement);

    let score_breakdown = ScoreBreakdown::new(skill_score, experience_score, education_score);
    let overall_score = score_breakdown.weighted_overall();

    let matched_skills_count = skill_matches.iter().filter(|m| m.is_matched).count();

    ScreeningOutcome {
        overall_score,
        recommendation: Recommendation::from_score(overall_score),
        matched_skills_count,
        total_required_skills: requirement.required_skills.len(),
        score_breakdown,
        skill_matches,
        final_score: None,
    }
}

/// Blends the resume score with interview sentiment and confidence:
/// `overall·0.6 + sentiment·0.2 + confidence·0.2`.
pub fn blend_final_score(overall_score: f64, sentiment_score: f64, confidence_score: f64) -> f64 {
    overall_score * BLEND_RESUME_WEIGHT
        + sentiment_score * BLEND_SENTIMENT_WEIGHT
        + confidence_score * BLEND_CONFIDENCE_WEIGHT
}

/// Runs the three-tier match per required skill and derives the skill score:
/// `100 × Σweights / |required|`, clamped to 100. No requirements means a
/// full score by design — absence of a bar is not a failed bar.
async fn match_skills(
    candidate_skills: &[String],
    required_skills: &[String],
    provider: &dyn ModelProvider,
) -> (Vec<SkillMatchRecord>, f64) {
    if required_skills.is_empty() {
        return (Vec::new(), 100.0);
    }

    let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

    // Candidate embeddings are encoded at most once per scoring run and
    // reused across every required skill.
    let mut candidate_embeddings: Option<Vec<Vec<f32>>> = None;
    let mut embeddings_requested = false;

    let mut records = Vec::with_capacity(required_skills.len());
    let mut matched_weight = 0.0_f64;

    for required in required_skills {
        let required_lower = required.to_lowercase();
        let mut hit: Option<(MatchType, f64, f64)> = None;

        if candidate_lower.iter().any(|c| *c == required_lower) {
            hit = Some((MatchType::Exact, 1.0, 1.0));
        } else if candidate_lower
            .iter()
            .any(|c| c.contains(&required_lower) || required_lower.contains(c.as_str()))
        {
            hit = Some((
                MatchType::Partial,
                PARTIAL_MATCH_CONFIDENCE,
                PARTIAL_MATCH_CONFIDENCE,
            ));
        } else if !candidate_skills.is_empty() {
            if !embeddings_requested {
                embeddings_requested = true;
                candidate_embeddings = provider.embed(candidate_skills).await;
            }
            if let Some(cand_embeddings) = &candidate_embeddings {
                if let Some(req_embeddings) =
                    provider.embed(std::slice::from_ref(required)).await
                {
                    if let Some(req_embedding) = req_embeddings.first() {
                        let best = cand_embeddings
                            .iter()
                            .map(|emb| cosine_similarity(req_embedding, emb))
                            .fold(f64::NEG_INFINITY, f64::max);
                        if best >= SEMANTIC_MATCH_THRESHOLD {
                            hit = Some((MatchType::Semantic, best, best));
                        }
                    }
                }
            }
        }

        let (match_type, confidence, weight) = hit.unwrap_or((MatchType::None, 0.0, 0.0));
        records.push(SkillMatchRecord {
            skill: required.clone(),
            is_matched: match_type != MatchType::None,
            match_type,
            confidence,
        });
        matched_weight += weight;
    }

    let skill_score = (matched_weight / required_skills.len() as f64) * 100.0;
    (records, skill_score.min(100.0))
}

/// Experience score against a "N+ years"-style requirement.
/// No requirement defaults to 80, an unparseable one to 70. Known years use
/// the 100/80/60/40 ladder at ≥req / ≥0.7·req / ≥0.5·req; unknown years fall
/// back to seniority keywords in the experience text, thresholded against
/// the required years.
fn score_experience(experience_text: &str, years: Option<f64>, required_experience: &str) -> f64 {
    if required_experience.trim().is_empty() {
        return 80.0;
    }

    let req_years = match LEADING_INT_RE
        .captures(required_experience)
        .and_then(|caps| caps[1].parse::<f64>().ok())
    {
        Some(y) => y,
        None => return 70.0,
    };

    if let Some(years) = years {
        return if years >= req_years {
            100.0
        } else if years >= req_years * 0.7 {
            80.0
        } else if years >= req_years * 0.5 {
            60.0
        } else {
            40.0
        };
    }

    let exp_lower = experience_text.to_lowercase();
    if ["senior", "lead", "principal", "manager"]
        .iter()
        .any(|w| exp_lower.contains(w))
    {
        if req_years <= 5.0 {
            90.0
        } else {
            70.0
        }
    } else if ["mid", "intermediate"].iter().any(|w| exp_lower.contains(w)) {
        if req_years <= 3.0 {
            80.0
        } else {
            50.0
        }
    } else if ["junior", "entry", "fresher", "intern"]
        .iter()
        .any(|w| exp_lower.contains(w))
    {
        if req_years <= 1.0 {
            70.0
        } else {
            30.0
        }
    } else {
        50.0
    }
}

/// Keyword → numeric tier, checked in declaration order. The candidate takes
/// the highest tier mentioned; the requirement takes the first.
const EDUCATION_TIERS: &[(&str, i32)] = &[
    ("phd", 100),
    ("doctorate", 100),
    ("master", 80),
    ("m.tech", 80),
    ("m.s.", 80),
    ("bachelor", 60),
    ("b.tech", 60),
    ("b.e.", 60),
    ("b.s.", 60),
    ("diploma", 40),
    ("certification", 30),
];

const DEFAULT_REQUIRED_TIER: i32 = 60;

/// Education score from the tier tables: 100 at or above the required tier,
/// then 80/60/40 at 20-point steps below it. No requirement defaults to 80.
fn score_education(education_text: &str, required_education: &str) -> f64 {
    if required_education.trim().is_empty() {
        return 80.0;
    }

    let edu_lower = education_text.to_lowercase();
    let req_lower = required_education.to_lowercase();

    let mut candidate_level = 0;
    for (keyword, level) in EDUCATION_TIERS {
        if edu_lower.contains(keyword) {
            candidate_level = candidate_level.max(*level);
        }
    }

    let mut required_level = DEFAULT_REQUIRED_TIER;
    for (keyword, level) in EDUCATION_TIERS {
        if req_lower.contains(keyword) {
            required_level = *level;
            break;
        }
    }

    if candidate_level >= required_level {
        100.0
    } else if candidate_level >= required_level - 20 {
        80.0
    } else if candidate_level >= required_level - 40 {
        60.0
    } else {
        40.0
    }
}
