//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;

use crate::caching::CacheTtlConfig;
use crate::http::DEFAULT_BASE_URL;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default server api id for server-scoped operations
    pub server_api_id: Option<String>,
    /// Application id registered with CFTools Cloud
    pub application_id: Option<String>,
    /// Application secret
    pub secret: Option<String>,
    /// API root
    pub base_url: String,
    /// Per-operation cache TTLs in seconds
    pub cache_ttls: CacheTtlConfig,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CFTOOLS_SERVER_API_ID` - Default server api id (default: none)
    /// - `CFTOOLS_APPLICATION_ID` / `CFTOOLS_SECRET` - Credentials (default: none)
    /// - `CFTOOLS_BASE_URL` - API root (default: https://data.cftools.cloud/)
    /// - `CACHE_TTL_*` - See [`cache_ttls_from_env`]
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            server_api_id: non_empty_var("CFTOOLS_SERVER_API_ID"),
            application_id: non_empty_var("CFTOOLS_APPLICATION_ID"),
            secret: non_empty_var("CFTOOLS_SECRET"),
            base_url: non_empty_var("CFTOOLS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_ttls: cache_ttls_from_env(),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(60),
        }
    }

    /// Application id and secret, when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.application_id, &self.secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_api_id: None,
            application_id: None,
            secret: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttls: CacheTtlConfig::default(),
            cleanup_interval: 60,
        }
    }
}

/// Reads cache TTLs in seconds. Unset or unparsable variables leave that
/// operation uncached.
///
/// - `CACHE_TTL_PRIORITY_QUEUE`
/// - `CACHE_TTL_PLAYER_DETAILS`
/// - `CACHE_TTL_GAME_SERVER_DETAILS`
/// - `CACHE_TTL_LEADERBOARD`
/// - `CACHE_TTL_WHITELIST`
pub fn cache_ttls_from_env() -> CacheTtlConfig {
    CacheTtlConfig {
        priority_queue: parsed_var("CACHE_TTL_PRIORITY_QUEUE").unwrap_or(0),
        player_details: parsed_var("CACHE_TTL_PLAYER_DETAILS").unwrap_or(0),
        game_server_details: parsed_var("CACHE_TTL_GAME_SERVER_DETAILS").unwrap_or(0),
        leaderboard: parsed_var("CACHE_TTL_LEADERBOARD").unwrap_or(0),
        whitelist: parsed_var("CACHE_TTL_WHITELIST").unwrap_or(0),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
