//! Score-and-persist: the core orchestration workflow.
//!
//! Fetch active jobs, fan out one scoring call per job, aggregate, keep pairs
//! at or above the acceptance threshold, persist the batch atomically, then
//! write-through to the cache. The cache write happens strictly after the
//! store commit — a failed request leaves neither rows nor cache entries.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::cache::{keys, MatchCache};
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::fanout::{score_candidates, Candidate};
use crate::matching::scorer::{PairScorer, ScoreTask};
use crate::matching::store;
use crate::models::matching::{MatchResult, RecommendedJob};

pub async fn analyze_cv_with_jobs(
    db: &PgPool,
    cache: &MatchCache,
    scorer: Arc<dyn PairScorer>,
    config: &Config,
    cv_text: &str,
    cv_id: i32,
) -> Result<Vec<MatchResult>, AppError> {
    let analysis_key = keys::cv_analysis(cv_id);

    // A live analysis for this CV is still fresh — return it without
    // burning another scoring batch.
    if let Some(cached) = cache.try_get_json::<Vec<MatchResult>>(&analysis_key).await {
        info!("analysis cache hit for CV {cv_id}");
        return Ok(cached);
    }

    let jobs = store::get_active_jobs(db).await?;
    info!("scoring CV {cv_id} against {} active job(s)", jobs.len());

    let candidates = jobs
        .into_iter()
        .map(|job| Candidate {
            id: job.id,
            text: job.detail,
        })
        .collect();

    let accepted = score_candidates(
        scorer,
        Arc::from(cv_text),
        candidates,
        ScoreTask::CvToJob,
        config.accept_threshold,
        config.scoring_concurrency,
    )
    .await;

    let computed_at = Utc::now();
    let results: Vec<MatchResult> = accepted
        .into_iter()
        .map(|scored| MatchResult {
            job_id: scored.id,
            match_score: scored.score,
            explanation: scored.explanation,
            created_at: computed_at,
        })
        .collect();

    // Single synchronization point: every fan-out call has settled by now.
    store::persist_analysis(db, cv_id, cv_text, &results).await?;

    let ttl = config.match_cache_ttl_secs;
    cache.try_put_json(&analysis_key, &results, ttl).await;

    // Also refresh the recommendation summary so recommend() reads return
    // exactly this batch while the entry is live.
    let summaries: Vec<RecommendedJob> = results
        .iter()
        .map(|result| RecommendedJob {
            job_id: result.job_id,
            score: result.match_score,
            explanation: result.explanation.clone(),
        })
        .collect();
    cache
        .try_put_json(&keys::cv_recommendations(cv_id), &summaries, ttl)
        .await;

    Ok(results)
}
