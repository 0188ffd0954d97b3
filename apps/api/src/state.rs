use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::MatchCache;
use crate::config::Config;
use crate::matching::scorer::PairScorer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything in here is an explicitly constructed client handle — no
/// module-level singletons. Handlers borrow what they need and pass it down.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: MatchCache,
    /// Pluggable pair scorer. Default: `LlmPairScorer` over the Anthropic API.
    pub scorer: Arc<dyn PairScorer>,
    pub config: Config,
}
