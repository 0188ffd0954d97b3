pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::cache::handlers as cache_handlers;
use crate::matching::handlers as matching_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/analyze/cv",
            post(matching_handlers::handle_analyze_cv),
        )
        .route(
            "/api/recommend/jobs-for-cv/:cv_id",
            get(matching_handlers::handle_jobs_for_cv),
        )
        .route(
            "/api/recommend/cvs-for-job/:job_id",
            get(matching_handlers::handle_cvs_for_job),
        )
        .route("/api/filter", post(matching_handlers::handle_filter))
        .route(
            "/api/related-jobs/:job_id",
            get(matching_handlers::handle_related_jobs),
        )
        // Cache utilities
        .route(
            "/api/cache/check-exists",
            get(cache_handlers::handle_check_exists),
        )
        .route("/api/cache/delete", delete(cache_handlers::handle_delete))
        .route(
            "/api/cache/list-keys",
            get(cache_handlers::handle_list_keys),
        )
        .route("/api/cache/get-ttl", get(cache_handlers::handle_get_ttl))
        .with_state(state)
}
