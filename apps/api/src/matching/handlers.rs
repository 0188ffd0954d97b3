use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::matching::{analyze, filter, recommend, related};
use crate::models::matching::{MatchResult, MatchedCandidate, RecommendedCv, RecommendedJob, RelatedJob};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeCvRequest {
    pub cv_text: String,
    pub cv_id: i32,
}

#[derive(Serialize)]
pub struct JobRecommendationsResponse {
    pub cv_id: i32,
    pub recommended_jobs: Vec<RecommendedJob>,
}

#[derive(Serialize)]
pub struct CvRecommendationsResponse {
    pub job_id: i32,
    pub recommended_cvs: Vec<RecommendedCv>,
}

#[derive(Deserialize)]
pub struct FilterRequest {
    pub filters: serde_json::Value,
}

#[derive(Serialize)]
pub struct FilterResponse {
    pub matched_candidates: Vec<MatchedCandidate>,
}

/// POST /api/analyze/cv
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeCvRequest>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    if req.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text must not be empty".to_string()));
    }

    let results = analyze::analyze_cv_with_jobs(
        &state.db,
        &state.cache,
        Arc::clone(&state.scorer),
        &state.config,
        &req.cv_text,
        req.cv_id,
    )
    .await?;
    Ok(Json(results))
}

/// GET /api/recommend/jobs-for-cv/:cv_id
pub async fn handle_jobs_for_cv(
    State(state): State<AppState>,
    Path(cv_id): Path<i32>,
) -> Result<Json<JobRecommendationsResponse>, AppError> {
    let recommended_jobs =
        recommend::recommend_jobs_for_cv(&state.db, &state.cache, &state.config, cv_id).await?;
    Ok(Json(JobRecommendationsResponse {
        cv_id,
        recommended_jobs,
    }))
}

/// GET /api/recommend/cvs-for-job/:job_id
pub async fn handle_cvs_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<CvRecommendationsResponse>, AppError> {
    let recommended_cvs =
        recommend::recommend_cvs_for_job(&state.db, &state.cache, &state.config, job_id).await?;
    Ok(Json(CvRecommendationsResponse {
        job_id,
        recommended_cvs,
    }))
}

/// POST /api/filter
pub async fn handle_filter(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let is_empty_object = req.filters.as_object().map(|o| o.is_empty()).unwrap_or(true);
    if is_empty_object {
        return Err(AppError::Validation(
            "filters must be a non-empty object".to_string(),
        ));
    }

    let matched_candidates = filter::filter_candidates(
        &state.db,
        Arc::clone(&state.scorer),
        &state.config,
        &req.filters,
    )
    .await?;
    Ok(Json(FilterResponse { matched_candidates }))
}

/// GET /api/related-jobs/:job_id
pub async fn handle_related_jobs(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<Vec<RelatedJob>>, AppError> {
    let results = related::related_jobs(
        &state.db,
        &state.cache,
        Arc::clone(&state.scorer),
        &state.config,
        job_id,
    )
    .await?;
    Ok(Json(results))
}
