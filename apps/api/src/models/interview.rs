use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Aggregate sentiment of an interview transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Full analysis of one interview transcript.
/// Immutable after creation — reanalysis creates a new outcome that replaces
/// the old one on the owning interview record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentOutcome {
    pub overall_sentiment: Sentiment,
    /// 0–100
    pub sentiment_score: f64,
    /// 0–100
    pub confidence_score: f64,
    /// Up to 5 excerpts, 100 chars each.
    pub positive_phrases: Vec<String>,
    pub negative_phrases: Vec<String>,
    /// Title-cased, deduplicated, capped at 10.
    pub key_topics: Vec<String>,
    pub clarity_score: f64,
    pub enthusiasm_score: f64,
    pub professionalism_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub transcript: Option<String>,
    /// `SentimentOutcome` stored as JSONB; null until analyzed.
    pub analysis: Option<Value>,
    pub is_analyzed: bool,
    pub created_at: DateTime<Utc>,
}
