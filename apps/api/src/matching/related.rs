//! Related-jobs lookup: compares one job against every other active posting.
//!
//! Results are cached but never persisted — similarity between postings is
//! derived data with no history table behind it.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::cache::{keys, MatchCache};
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::fanout::{score_candidates, Candidate};
use crate::matching::scorer::{PairScorer, ScoreTask};
use crate::matching::store;
use crate::models::job::JobRow;
use crate::models::matching::RelatedJob;

/// Similarity cutoff for listing a job as related. Looser than the match
/// acceptance threshold — these are browse suggestions, not placements.
const RELATED_THRESHOLD: f64 = 0.4;

pub async fn related_jobs(
    db: &PgPool,
    cache: &MatchCache,
    scorer: Arc<dyn PairScorer>,
    config: &Config,
    job_id: i32,
) -> Result<Vec<RelatedJob>, AppError> {
    let key = keys::related_jobs(job_id);
    if let Some(cached) = cache.try_get_json::<Vec<RelatedJob>>(&key).await {
        return Ok(cached);
    }

    let job = store::get_job(db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let others = store::get_active_jobs_except(db, job_id).await?;
    info!(
        "comparing job {job_id} against {} other active job(s)",
        others.len()
    );

    let subject = job_compare_text(&job);
    let candidates = others
        .iter()
        .map(|other| Candidate {
            id: other.id,
            text: job_compare_text(other),
        })
        .collect();

    let scored = score_candidates(
        scorer,
        Arc::from(subject),
        candidates,
        ScoreTask::JobToJob,
        RELATED_THRESHOLD,
        config.scoring_concurrency,
    )
    .await;

    let results: Vec<RelatedJob> = scored
        .into_iter()
        .map(|similar| RelatedJob {
            job_id: similar.id,
            score: round3(similar.score),
            explanation: similar.explanation,
        })
        .collect();

    cache
        .try_put_json(&key, &results, config.related_cache_ttl_secs)
        .await;
    Ok(results)
}

/// The text blob handed to the scorer for one posting.
fn job_compare_text(job: &JobRow) -> String {
    format!("Job Name: {}\nJob Description: {}", job.name, job.detail)
}

fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.9995), 1.0);
        assert_eq!(round3(0.4), 0.4);
    }

    #[test]
    fn test_job_compare_text_includes_name_and_detail() {
        let job = JobRow {
            id: 1,
            name: "Backend Engineer".to_string(),
            detail: "Rust services".to_string(),
        };
        let text = job_compare_text(&job);
        assert!(text.contains("Backend Engineer"));
        assert!(text.contains("Rust services"));
    }
}
