//! Sentiment/confidence analyzer — scores an interview transcript for
//! sentiment, confidence, and communication quality.
//!
//! Per-sentence sentiment prefers the classification model when the provider
//! has one; otherwise each sentence is scored by positive- vs
//! negative-lexicon hits. The aggregate formulas and the lexicons themselves
//! are fixed product behavior — tune with care.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::lexicon::title_case;
use crate::model_client::{ModelProvider, SentimentLabel};
use crate::models::interview::{Sentiment, SentimentOutcome};

const MAX_PHRASES: usize = 5;
const MAX_TOPICS: usize = 10;
const PHRASE_EXCERPT_CHARS: usize = 100;
/// Model predictions below this score are counted but not quoted.
const PHRASE_CONFIDENCE_FLOOR: f64 = 0.8;

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static POSITIVE_WORDS: &[&str] = &[
    "excellent", "great", "amazing", "fantastic", "wonderful", "outstanding", "passionate",
    "excited", "enthusiastic", "confident", "strong", "successful", "achieved", "accomplished",
    "led", "improved", "increased", "delivered", "innovative", "creative", "motivated",
    "dedicated", "committed", "experienced", "expertise", "proficient", "skilled", "capable",
    "effective", "efficient",
];

static NEGATIVE_WORDS: &[&str] = &[
    "difficult", "challenging", "struggled", "failed", "problem", "issue", "weakness", "concern",
    "worried", "nervous", "unsure", "unclear", "confused", "frustrated", "disappointed",
    "unfortunately", "however", "but", "although", "despite", "lack", "limited", "basic",
];

static HIGH_CONFIDENCE_MARKERS: &[&str] = &[
    "i am confident", "i believe", "i'm certain", "definitely", "absolutely", "i'm sure",
    "without doubt", "i know", "clearly",
];

static MEDIUM_CONFIDENCE_MARKERS: &[&str] = &[
    "i think", "probably", "likely", "should be", "could be", "i would say", "in my opinion",
    "i feel",
];

static LOW_CONFIDENCE_MARKERS: &[&str] = &[
    "maybe", "perhaps", "i'm not sure", "i don't know", "possibly", "i guess", "sort of",
    "kind of", "might be",
];

static FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "basically", "actually", "literally"];

static ENTHUSIASM_WORDS: &[&str] = &[
    "excited", "passionate", "love", "enjoy", "thrilled", "eager", "enthusiastic", "motivated",
    "inspired", "fascinating", "amazing", "wonderful", "great opportunity", "looking forward",
];

static PROFESSIONAL_PHRASES: &[&str] = &[
    "in my experience", "i have worked", "i was responsible", "i led", "i managed",
    "i collaborated", "i developed", "my expertise", "my skills", "professional development",
    "team collaboration", "project management", "stakeholders",
];

static UNPROFESSIONAL_WORDS: &[&str] = &["hate", "stupid", "boring", "whatever", "don't care"];

static TOPIC_KEYWORDS: &[&str] = &[
    "experience", "project", "team", "development", "software", "programming", "leadership",
    "management", "skills", "technology", "solution", "problem", "communication",
    "collaboration", "innovation", "learning", "growth", "achievement", "success", "challenge",
    "opportunity", "responsibility",
];

/// Analyzes one interview transcript. Total function — an empty transcript
/// yields a neutral outcome, and a missing classification model silently
/// selects the keyword path.
pub async fn analyze_transcript(transcript: &str, provider: &dyn ModelProvider) -> SentimentOutcome {
    let sentences = split_sentences(transcript);

    let mut positive_phrases: Vec<String> = Vec::new();
    let mut negative_phrases: Vec<String> = Vec::new();
    let mut positive_count = 0usize;
    let mut negative_count = 0usize;
    let mut neutral_count = 0usize;

    for sentence in &sentences {
        if let Some(prediction) = provider.classify_sentiment(sentence).await {
            match prediction.label {
                SentimentLabel::Positive => {
                    positive_count += 1;
                    if prediction.score > PHRASE_CONFIDENCE_FLOOR {
                        positive_phrases.push(excerpt(sentence));
                    }
                }
                SentimentLabel::Negative => {
                    negative_count += 1;
                    if prediction.score > PHRASE_CONFIDENCE_FLOOR {
                        negative_phrases.push(excerpt(sentence));
                    }
                }
            }
            continue;
        }

        let sentence_lower = sentence.to_lowercase();
        let pos_hits = POSITIVE_WORDS
            .iter()
            .filter(|w| sentence_lower.contains(*w))
            .count();
        let neg_hits = NEGATIVE_WORDS
            .iter()
            .filter(|w| sentence_lower.contains(*w))
            .count();

        if pos_hits > neg_hits {
            positive_count += 1;
            if pos_hits >= 2 {
                positive_phrases.push(excerpt(sentence));
            }
        } else if neg_hits > pos_hits {
            negative_count += 1;
            if neg_hits >= 2 {
                negative_phrases.push(excerpt(sentence));
            }
        } else {
            neutral_count += 1;
        }
    }

    let total = positive_count + negative_count + neutral_count;
    let (sentiment_score, overall_sentiment) = if total == 0 {
        (50.0, Sentiment::Neutral)
    } else {
        let score = (positive_count * 100 + neutral_count * 50) as f64 / total as f64;
        let overall = if positive_count > negative_count * 2 {
            Sentiment::Positive
        } else if negative_count > positive_count * 2 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        (score, overall)
    };

    positive_phrases.truncate(MAX_PHRASES);
    negative_phrases.truncate(MAX_PHRASES);

    let mut key_topics = extract_key_topics(transcript);
    key_topics.truncate(MAX_TOPICS);

    SentimentOutcome {
        overall_sentiment,
        sentiment_score,
        confidence_score: confidence_score(transcript, &sentences),
        positive_phrases,
        negative_phrases,
        key_topics,
        clarity_score: clarity_score(transcript, &sentences),
        enthusiasm_score: enthusiasm_score(transcript),
        professionalism_score: professionalism_score(transcript),
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn excerpt(sentence: &str) -> String {
    sentence.chars().take(PHRASE_EXCERPT_CHARS).collect()
}

fn average_sentence_words(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
    total as f64 / sentences.len() as f64
}

/// Weighted count of confidence markers (high 100 / medium 60 / low 30,
/// default 60 when none appear), nudged ±10 by average sentence length and
/// clamped to [0,100].
fn confidence_score(transcript: &str, sentences: &[String]) -> f64 {
    let lower = transcript.to_lowercase();
    let high = HIGH_CONFIDENCE_MARKERS
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    let medium = MEDIUM_CONFIDENCE_MARKERS
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    let low = LOW_CONFIDENCE_MARKERS
        .iter()
        .filter(|p| lower.contains(*p))
        .count();

    let total = high + medium + low;
    let mut score = if total == 0 {
        60.0
    } else {
        (high * 100 + medium * 60 + low * 30) as f64 / total as f64
    };

    // Longer, complete sentences read as more confident.
    let avg_words = average_sentence_words(sentences);
    if avg_words > 15.0 {
        score += 10.0;
    } else if avg_words < 8.0 {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Sentence-length score (100 at a 10–20 word average, 80 at 8–10 or 20–25,
/// else 60) minus 5 per filler occurrence, capped at a 30-point penalty.
fn clarity_score(transcript: &str, sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 50.0;
    }

    let avg_words = average_sentence_words(sentences);
    let length_score = if (10.0..=20.0).contains(&avg_words) {
        100.0
    } else if (8.0..10.0).contains(&avg_words) || (20.0..=25.0).contains(&avg_words) {
        80.0
    } else {
        60.0
    };

    let lower = transcript.to_lowercase();
    let filler_count: usize = FILLER_WORDS.iter().map(|f| lower.matches(*f).count()).sum();
    let penalty = (filler_count * 5).min(30) as f64;

    (length_score - penalty).max(0.0)
}

/// Base 50 plus 10 per enthusiasm hit, capped at 100.
fn enthusiasm_score(transcript: &str) -> f64 {
    let lower = transcript.to_lowercase();
    let count = ENTHUSIASM_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count();
    50.0 + (count * 10).min(50) as f64
}

/// Base 60 plus 5 per professional phrase, minus 15 per unprofessional word,
/// clamped to [0,100].
fn professionalism_score(transcript: &str) -> f64 {
    let lower = transcript.to_lowercase();
    let professional = PROFESSIONAL_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    let unprofessional = UNPROFESSIONAL_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count();

    let score = 60.0 + (professional * 5) as f64 - (unprofessional * 15) as f64;
    score.clamp(0.0, 100.0)
}

/// Whole-word topic-lexicon matches, deduplicated in first-seen order and
/// title-cased.
fn extract_key_topics(transcript: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for word in transcript.to_lowercase().split_whitespace() {
        let clean: String = word.chars().filter(char::is_ascii_lowercase).collect();
        if TOPIC_KEYWORDS.contains(&clean.as_str()) && !found.contains(&clean) {
            found.push(clean);
        }
    }
    found.iter().map(|t| title_case(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::{KeywordOnlyProvider, SentimentPrediction};
    use async_trait::async_trait;

    const POSITIVE_TRANSCRIPT: &str = "\
I led an excellent team and we delivered strong results. \
I am confident in my expertise and achieved successful outcomes. \
We improved the deployment pipeline significantly.";

    #[tokio::test]
    async fn test_positive_transcript_reads_positive() {
        let outcome = analyze_transcript(POSITIVE_TRANSCRIPT, &KeywordOnlyProvider).await;
        assert_eq!(outcome.overall_sentiment, Sentiment::Positive);
        assert!(outcome.sentiment_score > 50.0);
    }

    #[tokio::test]
    async fn test_sentiment_score_formula() {
        // Two clearly positive sentences, one neutral: (2*100 + 1*50) / 3.
        let transcript = "I achieved excellent results. I delivered strong improvements. \
                          The office is downtown.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert!((outcome.sentiment_score - 250.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_negative_transcript_reads_negative() {
        let transcript = "I struggled with the problem. I failed to fix the issue. \
                          I was worried and nervous.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert_eq!(outcome.overall_sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_empty_transcript_is_neutral() {
        let outcome = analyze_transcript("", &KeywordOnlyProvider).await;
        assert_eq!(outcome.overall_sentiment, Sentiment::Neutral);
        assert_eq!(outcome.sentiment_score, 50.0);
        // No markers (base 60) and a zero-word average sentence (-10).
        assert_eq!(outcome.confidence_score, 50.0);
        assert_eq!(outcome.clarity_score, 50.0);
        assert!(outcome.positive_phrases.is_empty());
        assert!(outcome.key_topics.is_empty());
    }

    #[tokio::test]
    async fn test_confidence_markers_weighted() {
        // One high marker, eight-plus-word sentences, no adjustment band hit.
        let transcript = "I am confident this design scales well for us.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert_eq!(outcome.confidence_score, 100.0);

        let hedged = "Maybe it works. Perhaps not. I guess we will see soon.";
        let outcome = analyze_transcript(hedged, &KeywordOnlyProvider).await;
        // Three low markers → 30, short sentences → −10.
        assert_eq!(outcome.confidence_score, 20.0);
    }

    #[tokio::test]
    async fn test_clarity_penalized_by_fillers() {
        // 10-word sentence → 100, two fillers ("um", "like") → −10 each.
        let transcript = "Um I like shipped the project with my whole team quickly.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert_eq!(outcome.clarity_score, 90.0);
    }

    #[tokio::test]
    async fn test_enthusiasm_accumulates() {
        let transcript = "I am excited and passionate about this team.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert_eq!(outcome.enthusiasm_score, 70.0);
    }

    #[tokio::test]
    async fn test_professionalism_rewards_and_penalizes() {
        let professional = "In my experience I led delivery and I managed stakeholders.";
        let outcome = analyze_transcript(professional, &KeywordOnlyProvider).await;
        // "in my experience" + "i led" + "i managed" + "stakeholders" = +20.
        assert_eq!(outcome.professionalism_score, 80.0);

        let sloppy = "I hate boring standups, whatever.";
        let outcome = analyze_transcript(sloppy, &KeywordOnlyProvider).await;
        // Three unprofessional words = −45.
        assert_eq!(outcome.professionalism_score, 15.0);
    }

    #[tokio::test]
    async fn test_key_topics_deduplicated_and_title_cased() {
        let transcript = "The project was a team project about team growth.";
        let outcome = analyze_transcript(transcript, &KeywordOnlyProvider).await;
        assert_eq!(
            outcome.key_topics,
            vec!["Project".to_string(), "Team".to_string(), "Growth".to_string()]
        );
    }

    #[tokio::test]
    async fn test_phrase_lists_capped_at_five() {
        let sentence = "I achieved excellent strong successful results";
        let transcript = vec![sentence; 8].join(". ");
        let outcome = analyze_transcript(&transcript, &KeywordOnlyProvider).await;
        assert_eq!(outcome.positive_phrases.len(), 5);
    }

    /// Classifier stub that calls everything positive with high confidence.
    struct AlwaysPositiveProvider;

    #[async_trait]
    impl ModelProvider for AlwaysPositiveProvider {
        async fn embed(&self, _texts: &[String]) -> Option<Vec<Vec<f32>>> {
            None
        }

        async fn classify_sentiment(&self, _text: &str) -> Option<SentimentPrediction> {
            Some(SentimentPrediction {
                label: SentimentLabel::Positive,
                score: 0.95,
            })
        }
    }

    #[tokio::test]
    async fn test_model_predictions_take_precedence_over_keywords() {
        // Keyword counting would call this negative; the model overrides.
        let transcript = "I struggled with a difficult problem.";
        let outcome = analyze_transcript(transcript, &AlwaysPositiveProvider).await;
        assert_eq!(outcome.overall_sentiment, Sentiment::Positive);
        assert_eq!(outcome.sentiment_score, 100.0);
        assert_eq!(outcome.positive_phrases.len(), 1);
    }
}
