use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Requirements extracted from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    /// Technical-lexicon hits ordered before free-form noun phrases, capped at 15.
    pub required_skills: Vec<String>,
    /// Free text, e.g. "3+ years". Empty when the description gives no signal.
    pub experience_requirement: String,
    /// Free text tier label, e.g. "Bachelor's Degree". Empty when absent.
    pub education_requirement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_requirement: String,
    pub education_requirement: String,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    /// The requirement value object the scoring engine consumes.
    pub fn requirement(&self) -> JobRequirement {
        JobRequirement {
            required_skills: self.required_skills.clone(),
            experience_requirement: self.experience_requirement.clone(),
            education_requirement: self.education_requirement.clone(),
        }
    }
}
