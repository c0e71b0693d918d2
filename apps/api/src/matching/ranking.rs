//! Ranking orchestrator — scores a batch of candidates against one job and
//! returns them ordered best-first.
//!
//! Candidates are independent (read-only requirement + provider, no shared
//! accumulator), so scoring fans out across tasks; one candidate failing
//! cannot corrupt or block another. The final sort is stable: equal scores
//! keep their input order.

use std::sync::Arc;

use tokio::task::JoinSet;
use uuid::Uuid;

use crate::matching::scoring::score_candidate;
use crate::model_client::ModelProvider;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRequirement;
use crate::models::screening::ScreeningOutcome;

/// One candidate's scored position in a ranking run.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub resume_id: Uuid,
    pub profile: CandidateProfile,
    pub outcome: ScreeningOutcome,
}

/// Scores every candidate against the requirement and sorts descending by
/// overall score.
pub async fn rank_candidates(
    candidates: Vec<(Uuid, CandidateProfile)>,
    requirement: &JobRequirement,
    provider: Arc<dyn ModelProvider>,
) -> Vec<RankedCandidate> {
    let mut tasks = JoinSet::new();
    for (index, (resume_id, profile)) in candidates.into_iter().enumerate() {
        let requirement = requirement.clone();
        let provider = Arc::clone(&provider);
        tasks.spawn(async move {
            let outcome = score_candidate(&profile, &requirement, provider.as_ref()).await;
            (
                index,
                RankedCandidate {
                    resume_id,
                    profile,
                    outcome,
                },
            )
        });
    }

    let mut indexed: Vec<(usize, RankedCandidate)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(scored) => indexed.push(scored),
            Err(e) => tracing::error!("Candidate scoring task failed: {e}"),
        }
    }

    // Restore submission order before sorting so ties resolve to input order.
    indexed.sort_by_key(|(index, _)| *index);
    let mut ranked: Vec<RankedCandidate> = indexed.into_iter().map(|(_, c)| c).collect();
    ranked.sort_by(|a, b| b.outcome.overall_score.total_cmp(&a.outcome.overall_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::KeywordOnlyProvider;

    fn candidate(skills: &[&str]) -> (Uuid, CandidateProfile) {
        (
            Uuid::new_v4(),
            CandidateProfile {
                skills: skills.iter().map(|s| s.to_string()).collect(),
                ..CandidateProfile::default()
            },
        )
    }

    fn requirement(skills: &[&str]) -> JobRequirement {
        JobRequirement {
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..JobRequirement::default()
        }
    }

    #[tokio::test]
    async fn test_ranking_sorts_descending() {
        let weak = candidate(&[]);
        let strong = candidate(&["Python", "Rust"]);
        let ranked = rank_candidates(
            vec![weak.clone(), strong.clone()],
            &requirement(&["Python", "Rust"]),
            Arc::new(KeywordOnlyProvider),
        )
        .await;

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].resume_id, strong.0);
        assert_eq!(ranked[1].resume_id, weak.0);
        assert!(ranked[0].outcome.overall_score > ranked[1].outcome.overall_score);
    }

    #[tokio::test]
    async fn test_ranking_is_stable_for_ties() {
        // Scores land at [low, high, high]; the two highs must keep their
        // input order.
        let low = candidate(&[]);
        let first_high = candidate(&["Python", "Rust"]);
        let second_high = candidate(&["Python", "Rust"]);

        let ranked = rank_candidates(
            vec![low.clone(), first_high.clone(), second_high.clone()],
            &requirement(&["Python", "Rust"]),
            Arc::new(KeywordOnlyProvider),
        )
        .await;

        assert_eq!(ranked[0].resume_id, first_high.0);
        assert_eq!(ranked[1].resume_id, second_high.0);
        assert_eq!(ranked[2].resume_id, low.0);
        assert_eq!(
            ranked[0].outcome.overall_score,
            ranked[1].outcome.overall_score
        );
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_ranking() {
        let ranked = rank_candidates(
            Vec::new(),
            &requirement(&["Python"]),
            Arc::new(KeywordOnlyProvider),
        )
        .await;
        assert!(ranked.is_empty());
    }
}
