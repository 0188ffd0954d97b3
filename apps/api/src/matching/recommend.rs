//! Cache-first recommendation reads.
//!
//! On a miss (or expired/broken cache) these fall back to the persisted match
//! history — never to a synchronous rescoring batch — and repopulate the
//! cache with the standard TTL. An id with no history yields an empty list.

use sqlx::PgPool;

use crate::cache::{keys, MatchCache};
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::store;
use crate::models::matching::{RecommendedCv, RecommendedJob};

pub async fn recommend_jobs_for_cv(
    db: &PgPool,
    cache: &MatchCache,
    config: &Config,
    cv_id: i32,
) -> Result<Vec<RecommendedJob>, AppError> {
    let key = keys::cv_recommendations(cv_id);
    if let Some(cached) = cache.try_get_json::<Vec<RecommendedJob>>(&key).await {
        return Ok(cached);
    }

    let matches = store::top_matches_for_cv(db, cv_id).await?;
    cache
        .try_put_json(&key, &matches, config.match_cache_ttl_secs)
        .await;
    Ok(matches)
}

pub async fn recommend_cvs_for_job(
    db: &PgPool,
    cache: &MatchCache,
    config: &Config,
    job_id: i32,
) -> Result<Vec<RecommendedCv>, AppError> {
    let key = keys::job_recommendations(job_id);
    if let Some(cached) = cache.try_get_json::<Vec<RecommendedCv>>(&key).await {
        return Ok(cached);
    }

    let matches = store::top_matches_for_job(db, job_id).await?;
    cache
        .try_put_json(&key, &matches, config.match_cache_ttl_secs)
        .await;
    Ok(matches)
}
