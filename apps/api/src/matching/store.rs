//! Match store queries.
//!
//! Schema is externally owned: `job` (catalog), `cv_job_matches` (append-only
//! match history), `nli_analysis` (one JSON log row per scoring batch).
//! History is append-only — re-analysis supersedes by inserting new rows,
//! never updating in place.

use sqlx::PgPool;
use tracing::info;

use crate::models::job::JobRow;
use crate::models::matching::{CvTextRow, MatchResult, RecommendedCv, RecommendedJob};

/// How many matches a recommendation read returns.
const TOP_MATCH_LIMIT: i64 = 10;

/// Returns all active job postings (enabled, not past their end date).
pub async fn get_active_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, name, detail
        FROM job
        WHERE enable = TRUE AND end_date > NOW()
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Returns all active jobs except the given one.
pub async fn get_active_jobs_except(
    pool: &PgPool,
    job_id: i32,
) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, name, detail
        FROM job
        WHERE enable = TRUE AND end_date > NOW() AND id <> $1
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// Looks up a single job by id, active or not.
pub async fn get_job(pool: &PgPool, job_id: i32) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT id, name, detail FROM job WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Top persisted matches for a CV, best first.
pub async fn top_matches_for_cv(
    pool: &PgPool,
    cv_id: i32,
) -> Result<Vec<RecommendedJob>, sqlx::Error> {
    sqlx::query_as::<_, RecommendedJob>(
        r#"
        SELECT job_id, match_score AS score, explanation
        FROM cv_job_matches
        WHERE cv_id = $1
        ORDER BY match_score DESC
        LIMIT $2
        "#,
    )
    .bind(cv_id)
    .bind(TOP_MATCH_LIMIT)
    .fetch_all(pool)
    .await
}

/// Top persisted matches for a job, best first.
pub async fn top_matches_for_job(
    pool: &PgPool,
    job_id: i32,
) -> Result<Vec<RecommendedCv>, sqlx::Error> {
    sqlx::query_as::<_, RecommendedCv>(
        r#"
        SELECT cv_id, match_score AS score, explanation
        FROM cv_job_matches
        WHERE job_id = $1
        ORDER BY match_score DESC
        LIMIT $2
        "#,
    )
    .bind(job_id)
    .bind(TOP_MATCH_LIMIT)
    .fetch_all(pool)
    .await
}

/// Every stored (cv_id, cv_text) pair, for candidate filtering. A CV appears
/// once per history row; the filter pipeline collapses to best-per-cv.
pub async fn cv_texts_for_filter(pool: &PgPool) -> Result<Vec<CvTextRow>, sqlx::Error> {
    sqlx::query_as::<_, CvTextRow>("SELECT cv_id, cv_text FROM cv_job_matches")
        .fetch_all(pool)
        .await
}

/// Persists one scoring batch atomically: a `cv_job_matches` row per accepted
/// pair plus the `nli_analysis` log row. All-or-nothing — a store failure
/// rolls everything back so the cache is never populated from a half-written
/// batch.
pub async fn persist_analysis(
    pool: &PgPool,
    cv_id: i32,
    cv_text: &str,
    results: &[MatchResult],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for result in results {
        sqlx::query(
            r#"
            INSERT INTO cv_job_matches (cv_id, job_id, cv_text, match_score, explanation)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(cv_id)
        .bind(result.job_id)
        .bind(cv_text)
        .bind(result.match_score)
        .bind(&result.explanation)
        .execute(&mut *tx)
        .await?;
    }

    // The log column predates JSONB in this schema; it stores serialized text.
    let log = serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string());
    sqlx::query("INSERT INTO nli_analysis (cv_id, analysis) VALUES ($1, $2)")
        .bind(cv_id)
        .bind(log)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Persisted analysis batch for CV {cv_id}: {} accepted match(es)",
        results.len()
    );
    Ok(())
}
