//! Candidate filtering: ranks stored CVs against recruiter criteria.
//!
//! Strictly read-only — this path never writes to the store or the cache.
//! The criteria object is opaque; it is serialized and handed to the scorer
//! as the second text of the pair.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::matching::fanout::{best_per_candidate, score_candidates, Candidate};
use crate::matching::scorer::{PairScorer, ScoreTask};
use crate::matching::store;
use crate::models::matching::MatchedCandidate;

/// Cutoff for surfacing a candidate to the recruiter. Stricter than the
/// match acceptance threshold: filtered lists are shortlists.
const FILTER_THRESHOLD: f64 = 0.6;

pub async fn filter_candidates(
    db: &PgPool,
    scorer: Arc<dyn PairScorer>,
    config: &Config,
    filters: &serde_json::Value,
) -> Result<Vec<MatchedCandidate>, AppError> {
    let criteria = serde_json::to_string_pretty(filters)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize filters: {e}")))?;

    let rows = store::cv_texts_for_filter(db).await?;
    info!("filtering {} stored CV row(s)", rows.len());

    let candidates = rows
        .into_iter()
        .map(|row| Candidate {
            id: row.cv_id,
            text: row.cv_text,
        })
        .collect();

    let scored = score_candidates(
        scorer,
        Arc::from(criteria),
        candidates,
        ScoreTask::FilterToCv,
        FILTER_THRESHOLD,
        config.scoring_concurrency,
    )
    .await;

    // The same CV can appear under several history rows; keep its best score.
    let ranked = best_per_candidate(scored);

    Ok(ranked
        .into_iter()
        .map(|candidate| MatchedCandidate {
            cv_id: candidate.id,
            match_score: candidate.score,
            reason: candidate.explanation,
        })
        .collect())
}
