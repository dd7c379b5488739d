//! Redis cache for finished analysis reports
//!
//! A caller-level memoization: the classifier itself holds no cache. Reports
//! are keyed by a hash of the review text, the declared language hint, and
//! the ruleset version, so a ruleset change invalidates every cached verdict.

use std::env;

use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

// Environment variable names
const ENV_REDIS_HOST: &str = "TRUSTBITES_REDIS_HOST";
const ENV_REDIS_PORT: &str = "TRUSTBITES_REDIS_PORT";
const ENV_REDIS_PASSWORD: &str = "TRUSTBITES_REDIS_PASSWORD";
const ENV_REDIS_DB: &str = "TRUSTBITES_REDIS_DB";
const ENV_CACHE_TTL: &str = "TRUSTBITES_CACHE_TTL";

// Default values
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: &str = "6379";
const DEFAULT_REDIS_DB: &str = "0";
const DEFAULT_TTL_SECONDS: u64 = 7 * 24 * 60 * 60; // 7 days

const PREFIX_ANALYSIS: &str = "analysis:";

/// Bumped whenever rule thresholds or phrase lists change, so stale verdicts
/// are never served for the new ruleset
const RULESET_VERSION: &str = "v1";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cache miss for key: {0}")]
    Miss(String),
}

/// Redis-based cache for analysis reports
#[derive(Clone)]
pub struct AnalysisCache {
    client: Client,
    ttl_seconds: u64,
}

impl AnalysisCache {
    /// Create a new cache instance and verify connection
    ///
    /// Configuration via environment variables:
    /// - `TRUSTBITES_REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `TRUSTBITES_REDIS_PORT` - Redis port (default: 6379)
    /// - `TRUSTBITES_REDIS_PASSWORD` - Redis password (default: none)
    /// - `TRUSTBITES_REDIS_DB` - Redis database number (default: 0)
    /// - `TRUSTBITES_CACHE_TTL` - Cache TTL in seconds (default: 7 days)
    pub async fn new() -> Result<Self, CacheError> {
        let host = env::var(ENV_REDIS_HOST).unwrap_or_else(|_| DEFAULT_REDIS_HOST.to_string());
        let port = env::var(ENV_REDIS_PORT).unwrap_or_else(|_| DEFAULT_REDIS_PORT.to_string());
        let password = env::var(ENV_REDIS_PASSWORD).ok();
        let db = env::var(ENV_REDIS_DB).unwrap_or_else(|_| DEFAULT_REDIS_DB.to_string());

        let ttl_seconds = env::var(ENV_CACHE_TTL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);

        // Build Redis URL: redis://[password@]host:port/db
        let redis_url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        tracing::debug!(host = %host, port = %port, db = %db, "Connecting to Redis");

        let client = Client::open(redis_url)?;

        // Test the connection by pinging Redis
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        tracing::info!(host = %host, port = %port, "Redis connection established");

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Get a cached analysis report by its composite key
    pub async fn get_analysis<T: DeserializeOwned>(&self, key_hash: &str) -> Result<T, CacheError> {
        self.get_with_prefix(PREFIX_ANALYSIS, key_hash).await
    }

    /// Cache an analysis report by its composite key
    pub async fn set_analysis<T: Serialize>(
        &self,
        key_hash: &str,
        data: &T,
    ) -> Result<(), CacheError> {
        self.set_with_prefix(PREFIX_ANALYSIS, key_hash, data).await
    }

    async fn get_with_prefix<T: DeserializeOwned>(
        &self,
        prefix: &str,
        key: &str,
    ) -> Result<T, CacheError> {
        let full_key = format!("{}{}", prefix, key);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let data: Option<String> = conn.get(&full_key).await?;

        match data {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| CacheError::Serialization(e.to_string()))
            }
            None => Err(CacheError::Miss(key.to_string())),
        }
    }

    async fn set_with_prefix<T: Serialize>(
        &self,
        prefix: &str,
        key: &str,
        data: &T,
    ) -> Result<(), CacheError> {
        let full_key = format!("{}{}", prefix, key);
        let json =
            serde_json::to_string(data).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(&full_key, json, self.ttl_seconds).await?;

        tracing::debug!(key = %full_key, ttl = self.ttl_seconds, "Cached data");
        Ok(())
    }
}

/// Cache key for one review analysis: text, declared language hint, and
/// ruleset version
pub fn analysis_cache_key(text: &str, declared_language: Option<&str>) -> String {
    let components = format!(
        "{}|{}|{}",
        text,
        declared_language.unwrap_or(""),
        RULESET_VERSION
    );
    hash_string(&components)
}

/// Hash a string to a hex string using SHA256
fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_stable() {
        let a = analysis_cache_key("Great food", Some("en"));
        let b = analysis_cache_key("Great food", Some("en"));
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_varies_with_text_and_language() {
        let base = analysis_cache_key("Great food", Some("en"));
        assert_ne!(base, analysis_cache_key("Great food!", Some("en")));
        assert_ne!(base, analysis_cache_key("Great food", Some("ms")));
        assert_ne!(base, analysis_cache_key("Great food", None));
    }
}
