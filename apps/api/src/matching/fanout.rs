//! Concurrent scoring fan-out.
//!
//! One scoring call per candidate, bounded concurrency, no ordering guarantee
//! on completion. Aggregation is the single synchronization point: callers get
//! the full accepted set back before anything is persisted or cached. A failed
//! call excludes that candidate only — the batch never aborts on scoring
//! errors.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::matching::scorer::{PairScorer, ScoreTask};

/// A candidate text to score against the batch subject.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: i32,
    pub text: String,
}

/// A candidate that settled successfully, threshold not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub id: i32,
    pub score: f64,
    pub explanation: String,
}

/// Scores every candidate against `subject`, keeps those at or above
/// `threshold`, and returns them ordered by descending score.
pub async fn score_candidates(
    scorer: Arc<dyn PairScorer>,
    subject: Arc<str>,
    candidates: Vec<Candidate>,
    task: ScoreTask,
    threshold: f64,
    concurrency: usize,
) -> Vec<ScoredCandidate> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut calls = JoinSet::new();

    for candidate in candidates {
        let scorer = Arc::clone(&scorer);
        let subject = Arc::clone(&subject);
        let semaphore = Arc::clone(&semaphore);
        calls.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            match scorer.score(&subject, &candidate.text, task).await {
                Ok(pair) => Some(ScoredCandidate {
                    id: candidate.id,
                    score: pair.score,
                    explanation: pair.explanation,
                }),
                Err(e) => {
                    // Isolated per-call failure: exclude, don't abort.
                    warn!("scoring failed for candidate {}: {e}", candidate.id);
                    None
                }
            }
        });
    }

    let mut accepted = Vec::new();
    while let Some(settled) = calls.join_next().await {
        match settled {
            Ok(Some(scored)) if scored.score >= threshold => accepted.push(scored),
            Ok(_) => {}
            Err(e) => warn!("scoring task aborted: {e}"),
        }
    }

    sort_by_score_desc(&mut accepted);
    accepted
}

pub fn sort_by_score_desc(results: &mut [ScoredCandidate]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Keeps the single best result per candidate id, ranked descending.
/// Candidate filtering can see the same CV under several history rows.
pub fn best_per_candidate(results: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    use std::collections::HashMap;

    let mut best: HashMap<i32, ScoredCandidate> = HashMap::new();
    for result in results {
        match best.get(&result.id) {
            Some(current) if current.score >= result.score => {}
            _ => {
                best.insert(result.id, result);
            }
        }
    }

    let mut ranked: Vec<ScoredCandidate> = best.into_values().collect();
    sort_by_score_desc(&mut ranked);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::matching::scorer::PairScore;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Scripted scorer: maps target text to a fixed score, or fails when the
    /// target is not in the script.
    struct ScriptedScorer {
        scores: HashMap<String, f64>,
    }

    impl ScriptedScorer {
        fn new(entries: &[(&str, f64)]) -> Arc<Self> {
            Arc::new(Self {
                scores: entries
                    .iter()
                    .map(|(text, score)| (text.to_string(), *score))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl PairScorer for ScriptedScorer {
        async fn score(
            &self,
            _subject: &str,
            target: &str,
            _task: ScoreTask,
        ) -> Result<PairScore, AppError> {
            match self.scores.get(target) {
                Some(score) => Ok(PairScore {
                    score: *score,
                    explanation: format!("scripted {score}"),
                }),
                None => Err(AppError::Llm("scripted failure".to_string())),
            }
        }
    }

    fn candidates(texts: &[(i32, &str)]) -> Vec<Candidate> {
        texts
            .iter()
            .map(|(id, text)| Candidate {
                id: *id,
                text: text.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_threshold_excludes_low_scores() {
        // "Python developer, 5 years" vs two targets: 0.8 accepted, 0.3 dropped.
        let scorer = ScriptedScorer::new(&[("text A", 0.8), ("text B", 0.3)]);
        let accepted = score_candidates(
            scorer,
            Arc::from("Python developer, 5 years"),
            candidates(&[(1, "text A"), (2, "text B")]),
            ScoreTask::CvToJob,
            0.5,
            5,
        )
        .await;

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, 1);
        assert_eq!(accepted[0].score, 0.8);
    }

    #[tokio::test]
    async fn test_failed_call_is_isolated() {
        // Candidate 3 has no scripted score, so its call errors. The other
        // two must still settle and the batch must succeed.
        let scorer = ScriptedScorer::new(&[("alpha", 0.9), ("beta", 0.7)]);
        let accepted = score_candidates(
            scorer,
            Arc::from("subject"),
            candidates(&[(1, "alpha"), (2, "beta"), (3, "gamma")]),
            ScoreTask::CvToJob,
            0.5,
            5,
        )
        .await;

        assert_eq!(accepted.len(), 2);
        assert!(accepted.iter().all(|s| s.id != 3));
    }

    #[tokio::test]
    async fn test_results_ordered_by_descending_score() {
        let scorer = ScriptedScorer::new(&[("a", 0.6), ("b", 0.95), ("c", 0.75)]);
        let accepted = score_candidates(
            scorer,
            Arc::from("subject"),
            candidates(&[(1, "a"), (2, "b"), (3, "c")]),
            ScoreTask::CvToJob,
            0.5,
            2,
        )
        .await;

        let ids: Vec<i32> = accepted.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_boundary_score_is_accepted() {
        // The acceptance rule is score >= threshold, not strictly greater.
        let scorer = ScriptedScorer::new(&[("edge", 0.5)]);
        let accepted = score_candidates(
            scorer,
            Arc::from("subject"),
            candidates(&[(1, "edge")]),
            ScoreTask::CvToJob,
            0.5,
            1,
        )
        .await;

        assert_eq!(accepted.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidate_set_yields_empty_batch() {
        let scorer = ScriptedScorer::new(&[]);
        let accepted = score_candidates(
            scorer,
            Arc::from("subject"),
            vec![],
            ScoreTask::CvToJob,
            0.5,
            5,
        )
        .await;

        assert!(accepted.is_empty());
    }

    #[test]
    fn test_best_per_candidate_keeps_highest() {
        let results = vec![
            ScoredCandidate {
                id: 1,
                score: 0.7,
                explanation: "first".to_string(),
            },
            ScoredCandidate {
                id: 1,
                score: 0.9,
                explanation: "second".to_string(),
            },
            ScoredCandidate {
                id: 2,
                score: 0.8,
                explanation: "third".to_string(),
            },
        ];

        let ranked = best_per_candidate(results);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[0].score, 0.9);
        assert_eq!(ranked[1].id, 2);
    }
}
