//! Redis cache adapter.
//!
//! The cache is a look-aside layer over the match store: entries are only
//! written after a compute-and-persist step and must always be reproducible
//! from store state. Orchestration paths therefore use the `try_*` methods,
//! which degrade a broken cache to a miss instead of failing the request.
//! The cache utility endpoints use the strict methods — there the cache IS
//! the subject, so errors must surface.

pub mod handlers;
pub mod keys;

use anyhow::{Context, Result};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Remaining lifetime of a cache key, decoded from Redis TTL semantics
/// (-2 = missing, -1 = no expiry, n = seconds left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    Missing,
    NoExpiry,
    Expires(i64),
}

impl KeyTtl {
    pub fn from_redis(ttl: i64) -> Self {
        match ttl {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::NoExpiry,
            n => KeyTtl::Expires(n),
        }
    }
}

#[derive(Clone)]
pub struct MatchCache {
    client: redis::Client,
}

impl MatchCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn conn(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("failed to connect to Redis")
    }

    /// Fetches and deserializes a JSON cache entry.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(key).await.context("GET failed")?;
        match raw {
            Some(s) => Ok(Some(
                serde_json::from_str(&s).with_context(|| format!("corrupt cache entry at {key}"))?,
            )),
            None => Ok(None),
        }
    }

    /// Serializes and stores a JSON cache entry with a TTL.
    /// Entries are whole-value replacements; last writer wins.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn().await?;
        let raw = serde_json::to_string(value)?;
        let _: () = conn
            .set_ex(key, raw, ttl_secs)
            .await
            .context("SETEX failed")?;
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        conn.exists(key).await.context("EXISTS failed")
    }

    /// Deletes a key. Returns whether a key was actually removed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        let removed: i64 = conn.del(key).await.context("DEL failed")?;
        Ok(removed > 0)
    }

    /// Lists keys matching a glob pattern.
    pub async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn().await?;
        conn.keys(pattern).await.context("KEYS failed")
    }

    pub async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let mut conn = self.conn().await?;
        let ttl: i64 = conn.ttl(key).await.context("TTL failed")?;
        Ok(KeyTtl::from_redis(ttl))
    }

    /// Read-through variant: a cache failure (or corrupt entry) is logged and
    /// reported as a miss so the caller falls back to recomputation.
    pub async fn try_get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_json(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("cache read failed for {key}, treating as miss: {e:#}");
                None
            }
        }
    }

    /// Write-through variant: the cache is non-authoritative, so write
    /// failures are logged and swallowed.
    pub async fn try_put_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        if let Err(e) = self.put_json(key, value, ttl_secs).await {
            warn!("cache write failed for {key}: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_missing_key() {
        assert_eq!(KeyTtl::from_redis(-2), KeyTtl::Missing);
    }

    #[test]
    fn test_ttl_persistent_key() {
        assert_eq!(KeyTtl::from_redis(-1), KeyTtl::NoExpiry);
    }

    #[test]
    fn test_ttl_expiring_key() {
        assert_eq!(KeyTtl::from_redis(1800), KeyTtl::Expires(1800));
        assert_eq!(KeyTtl::from_redis(0), KeyTtl::Expires(0));
    }
}
