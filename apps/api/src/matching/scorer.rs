//! Pair Scoring — pluggable, trait-based scorer over two opaque text blobs.
//!
//! Default: `LlmPairScorer` (Claude via `llm_client`). Tests swap in scripted
//! mocks; the orchestration code only ever sees the trait.
//!
//! `AppState` holds an `Arc<dyn PairScorer>`, constructed at startup.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{
    CV_JOB_PROMPT, CV_JOB_SYSTEM, FILTER_PROMPT, FILTER_SYSTEM, RELATED_PROMPT, RELATED_SYSTEM,
};

/// Which prompt a scoring call uses. The score semantics are identical in
/// every case: 0.0 = no match, 1.0 = perfect match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTask {
    /// subject = CV text, target = job description.
    CvToJob,
    /// subject = serialized filter criteria, target = CV text.
    FilterToCv,
    /// subject = queried job, target = candidate job.
    JobToJob,
}

/// Model output for one pair. The filter prompt historically uses
/// `match_score`/`reason` field names; aliases accept both shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct PairScore {
    #[serde(alias = "match_score")]
    pub score: f64,
    #[serde(alias = "reason", default)]
    pub explanation: String,
}

/// The pair scorer trait. Implement this to swap backends without touching
/// the orchestrator, handlers, or caller code.
#[async_trait]
pub trait PairScorer: Send + Sync {
    async fn score(
        &self,
        subject: &str,
        target: &str,
        task: ScoreTask,
    ) -> Result<PairScore, AppError>;
}

/// Semantic pair scorer via Claude.
pub struct LlmPairScorer {
    llm: LlmClient,
}

impl LlmPairScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PairScorer for LlmPairScorer {
    async fn score(
        &self,
        subject: &str,
        target: &str,
        task: ScoreTask,
    ) -> Result<PairScore, AppError> {
        let (system, prompt) = match task {
            ScoreTask::CvToJob => (
                CV_JOB_SYSTEM,
                CV_JOB_PROMPT
                    .replace("{cv_text}", subject)
                    .replace("{job_detail}", target),
            ),
            ScoreTask::FilterToCv => (
                FILTER_SYSTEM,
                FILTER_PROMPT
                    .replace("{filters}", subject)
                    .replace("{cv_text}", target),
            ),
            ScoreTask::JobToJob => (
                RELATED_SYSTEM,
                RELATED_PROMPT
                    .replace("{target_text}", subject)
                    .replace("{compare_text}", target),
            ),
        };

        let mut parsed: PairScore = self
            .llm
            .call_json(&prompt, system)
            .await
            .map_err(|e| AppError::Llm(format!("pair scoring failed: {e}")))?;

        // The prompt asks for [0,1] but the model is not a contract.
        parsed.score = parsed.score.clamp(0.0, 1.0);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_score_canonical_fields() {
        let parsed: PairScore =
            serde_json::from_str(r#"{"score": 0.8, "explanation": "strong overlap"}"#).unwrap();
        assert_eq!(parsed.score, 0.8);
        assert_eq!(parsed.explanation, "strong overlap");
    }

    #[test]
    fn test_pair_score_filter_aliases() {
        let parsed: PairScore =
            serde_json::from_str(r#"{"match_score": 0.65, "reason": "meets criteria"}"#).unwrap();
        assert_eq!(parsed.score, 0.65);
        assert_eq!(parsed.explanation, "meets criteria");
    }

    #[test]
    fn test_pair_score_missing_explanation_defaults_empty() {
        let parsed: PairScore = serde_json::from_str(r#"{"score": 0.1}"#).unwrap();
        assert_eq!(parsed.explanation, "");
    }

    #[test]
    fn test_prompts_substitute_both_placeholders() {
        let rendered = CV_JOB_PROMPT
            .replace("{cv_text}", "RUST DEV")
            .replace("{job_detail}", "BACKEND ROLE");
        assert!(rendered.contains("RUST DEV"));
        assert!(rendered.contains("BACKEND ROLE"));
        assert!(!rendered.contains("{cv_text}"));
        assert!(!rendered.contains("{job_detail}"));
    }
}
