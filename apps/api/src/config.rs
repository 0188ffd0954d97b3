use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Required variables fail startup; policy knobs fall back to the
/// defaults the matching pipeline was tuned with.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Minimum score for a CV/job pair to be persisted and returned.
    pub accept_threshold: f64,
    /// TTL for analysis and recommendation cache entries.
    pub match_cache_ttl_secs: u64,
    /// TTL for related-jobs cache entries. Job catalogs churn slowly,
    /// so these live longer than per-CV matches.
    pub related_cache_ttl_secs: u64,
    /// Maximum in-flight scoring calls per batch.
    pub scoring_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", "8080").parse::<u16>().context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            accept_threshold: env_or("MATCH_THRESHOLD", "0.5")
                .parse::<f64>()
                .context("MATCH_THRESHOLD must be a float in [0,1]")?,
            match_cache_ttl_secs: env_or("MATCH_CACHE_TTL_SECS", "1800")
                .parse::<u64>()
                .context("MATCH_CACHE_TTL_SECS must be a positive integer")?,
            related_cache_ttl_secs: env_or("RELATED_CACHE_TTL_SECS", "21600")
                .parse::<u64>()
                .context("RELATED_CACHE_TTL_SECS must be a positive integer")?,
            scoring_concurrency: env_or("SCORING_CONCURRENCY", "5")
                .parse::<usize>()
                .context("SCORING_CONCURRENCY must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
