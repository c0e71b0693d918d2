use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Structured fields extracted from a resume.
///
/// Every field has a safe default — extraction degrades gracefully on sparse
/// or malformed text instead of erroring (missing name becomes `"Unknown"`,
/// missing sections become empty strings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Deduplicated case-insensitively, display-cased, capped at 20.
    pub skills: Vec<String>,
    pub education: String,
    /// `"No professional experience"` for entry-level resumes with no work history.
    pub experience: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub estimated_years_of_experience: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub file_name: String,
    pub raw_text: Option<String>,
    /// `CandidateProfile` stored as JSONB.
    pub parsed_data: Value,
    pub is_parsed: bool,
    pub parse_error: Option<String>,
    pub created_at: DateTime<Utc>,
}
