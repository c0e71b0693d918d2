//! Model client — the single point of entry for all inference calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the inference endpoint
//! directly. Extraction, scoring, and sentiment all receive a
//! `dyn ModelProvider` and must treat `None` as "capability unavailable" —
//! every algorithm has a deterministic keyword fallback, so a missing model
//! is never an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Label assigned by the sentiment classification model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

/// One sentence-level prediction from the classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: SentimentLabel,
    /// Model confidence, 0.0–1.0.
    pub score: f64,
}

/// Injected inference capability. Both methods return `None` when the
/// backing model is unavailable; callers fall back to keyword heuristics.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Encodes a batch of texts into embedding vectors, one per input,
    /// in input order.
    async fn embed(&self, texts: &[String]) -> Option<Vec<Vec<f32>>>;

    /// Classifies the sentiment of a single sentence.
    async fn classify_sentiment(&self, text: &str) -> Option<SentimentPrediction>;
}

/// Cosine similarity between two embedding vectors.
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordOnlyProvider — no model attached
// ────────────────────────────────────────────────────────────────────────────

/// Provider used when no inference endpoint is configured. Reports every
/// capability as unavailable so callers take their keyword fallbacks.
pub struct KeywordOnlyProvider;

#[async_trait]
impl ModelProvider for KeywordOnlyProvider {
    async fn embed(&self, _texts: &[String]) -> Option<Vec<Vec<f32>>> {
        None
    }

    async fn classify_sentiment(&self, _text: &str) -> Option<SentimentPrediction> {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpModelProvider — remote inference endpoint
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Provider backed by an HTTP text-inference endpoint exposing `/embed` and
/// `/sentiment`. The endpoint is probed exactly once, on first use — the
/// `OnceCell` guard means concurrent first calls wait on a single probe
/// instead of triggering duplicate initialization.
pub struct HttpModelProvider {
    client: Client,
    endpoint: String,
    available: OnceCell<bool>,
}

impl HttpModelProvider {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            available: OnceCell::new(),
        }
    }

    /// One-time availability probe. Subsequent calls reuse the cached result.
    async fn ensure_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| async {
                let url = format!("{}/health", self.endpoint);
                match self.client.get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        debug!("Inference endpoint available at {}", self.endpoint);
                        true
                    }
                    Ok(resp) => {
                        warn!(
                            "Inference endpoint probe returned {} — keyword fallbacks in effect",
                            resp.status()
                        );
                        false
                    }
                    Err(e) => {
                        warn!("Inference endpoint unreachable ({e}) — keyword fallbacks in effect");
                        false
                    }
                }
            })
            .await
    }

    /// POSTs a JSON body, retrying on 429 and 5xx with exponential backoff.
    /// Any terminal failure yields `None` — model trouble is a degradation,
    /// not an error.
    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Option<R> {
        let url = format!("{}{path}", self.endpoint);

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Inference call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!("Inference call to {url} failed: {e}");
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Inference endpoint returned {status} for {url}");
                continue;
            }
            if !status.is_success() {
                warn!("Inference endpoint rejected {url} with {status}");
                return None;
            }

            match response.json::<R>().await {
                Ok(parsed) => return Some(parsed),
                Err(e) => {
                    warn!("Inference response from {url} failed to parse: {e}");
                    return None;
                }
            }
        }

        None
    }
}

#[async_trait]
impl ModelProvider for HttpModelProvider {
    async fn embed(&self, texts: &[String]) -> Option<Vec<Vec<f32>>> {
        if texts.is_empty() || !self.ensure_available().await {
            return None;
        }
        let response: EmbedResponse = self.post_json("/embed", &EmbedRequest { texts }).await?;
        if response.embeddings.len() != texts.len() {
            warn!(
                "Embedding count mismatch: asked for {}, got {}",
                texts.len(),
                response.embeddings.len()
            );
            return None;
        }
        Some(response.embeddings)
    }

    async fn classify_sentiment(&self, text: &str) -> Option<SentimentPrediction> {
        if !self.ensure_available().await {
            return None;
        }
        // The classifier truncates internally; keep requests bounded anyway.
        let bounded: String = text.chars().take(512).collect();
        self.post_json("/sentiment", &ClassifyRequest { text: &bounded })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.5, 0.5, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_orthogonal_vectors_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_negative_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_mismatched_lengths_is_zero() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[tokio::test]
    async fn test_keyword_only_provider_has_no_capabilities() {
        let provider = KeywordOnlyProvider;
        assert!(provider.embed(&["rust".to_string()]).await.is_none());
        assert!(provider.classify_sentiment("great work").await.is_none());
    }

    #[test]
    fn test_sentiment_label_deserializes_uppercase() {
        let label: SentimentLabel = serde_json::from_str("\"POSITIVE\"").unwrap();
        assert_eq!(label, SentimentLabel::Positive);
        let label: SentimentLabel = serde_json::from_str("\"NEGATIVE\"").unwrap();
        assert_eq!(label, SentimentLabel::Negative);
    }
}
