//! Cache utility endpoints — thin pass-throughs to Redis for operators
//! inspecting or invalidating entries by hand.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::cache::KeyTtl;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct KeyQuery {
    pub key: String,
}

#[derive(Deserialize)]
pub struct PatternQuery {
    pub pattern: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ListKeysResponse {
    pub keys: Vec<String>,
}

#[derive(Serialize)]
pub struct TtlResponse {
    pub ttl: Option<i64>,
    pub exists: bool,
    pub message: String,
}

/// GET /api/cache/check-exists?key=...
pub async fn handle_check_exists(
    State(state): State<AppState>,
    Query(params): Query<KeyQuery>,
) -> Result<Json<bool>, AppError> {
    let exists = state
        .cache
        .exists(&params.key)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    Ok(Json(exists))
}

/// DELETE /api/cache/delete?key=...
pub async fn handle_delete(
    State(state): State<AppState>,
    Query(params): Query<KeyQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state
        .cache
        .delete(&params.key)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    Ok(Json(if removed {
        DeleteResponse {
            success: true,
            message: "Cache deleted successfully".to_string(),
        }
    } else {
        DeleteResponse {
            success: false,
            message: "Key not found".to_string(),
        }
    }))
}

/// GET /api/cache/list-keys?pattern=...
pub async fn handle_list_keys(
    State(state): State<AppState>,
    Query(params): Query<PatternQuery>,
) -> Result<Json<ListKeysResponse>, AppError> {
    let pattern = params.pattern.as_deref().unwrap_or("*");
    let keys = state
        .cache
        .list_keys(pattern)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    Ok(Json(ListKeysResponse { keys }))
}

/// GET /api/cache/get-ttl?key=...
pub async fn handle_get_ttl(
    State(state): State<AppState>,
    Query(params): Query<KeyQuery>,
) -> Result<Json<TtlResponse>, AppError> {
    let ttl = state
        .cache
        .ttl(&params.key)
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    Ok(Json(match ttl {
        KeyTtl::Missing => TtlResponse {
            ttl: None,
            exists: false,
            message: "Key does not exist".to_string(),
        },
        KeyTtl::NoExpiry => TtlResponse {
            ttl: None,
            exists: true,
            message: "Key has no expiration".to_string(),
        },
        KeyTtl::Expires(secs) => TtlResponse {
            ttl: Some(secs),
            exists: true,
            message: format!("Key expires in {secs} seconds"),
        },
    }))
}
