use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One accepted CV/job pair from a scoring batch. This is both the analyze
/// response item and the payload cached under `nli_analysis:cv:{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: i32,
    pub match_score: f64,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

/// Recommendation summary for a CV, cached under `recommend:cv:{id}` and
/// read back from `cv_job_matches` on a miss.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RecommendedJob {
    pub job_id: i32,
    pub score: f64,
    pub explanation: String,
}

/// Recommendation summary for a job (the reverse direction).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RecommendedCv {
    pub cv_id: i32,
    pub score: f64,
    pub explanation: String,
}

/// CV text as stored alongside match history, used by candidate filtering.
#[derive(Debug, Clone, FromRow)]
pub struct CvTextRow {
    pub cv_id: i32,
    pub cv_text: String,
}

/// A job similar to the queried one. `jobId` casing is part of the public
/// wire format consumed by the existing frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedJob {
    #[serde(rename = "jobId")]
    pub job_id: i32,
    pub score: f64,
    pub explanation: String,
}

/// A CV ranked against recruiter filter criteria.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedCandidate {
    pub cv_id: i32,
    pub match_score: f64,
    pub reason: String,
}
