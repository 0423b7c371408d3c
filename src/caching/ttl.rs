//! TTL Policy
//!
//! Per-operation time-to-live settings for the caching client.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Operation ==
/// Read operations the caching client can memoize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GameServerDetails,
    PlayerDetails,
    Leaderboard,
    PriorityQueue,
    Whitelist,
}

impl Operation {
    /// Name used as the cache key prefix and in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GameServerDetails => "game_server_details",
            Operation::PlayerDetails => "player_details",
            Operation::Leaderboard => "leaderboard",
            Operation::PriorityQueue => "priority_queue",
            Operation::Whitelist => "whitelist",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == TTL Config ==
/// Seconds each cacheable operation's results stay valid.
///
/// Zero disables caching for that operation, so `Default` caches nothing.
/// Deserialization rejects unknown fields and fills missing ones with zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CacheTtlConfig {
    pub priority_queue: u64,
    pub player_details: u64,
    pub game_server_details: u64,
    pub leaderboard: u64,
    pub whitelist: u64,
}

impl CacheTtlConfig {
    /// Same TTL for every operation.
    pub fn uniform(ttl_seconds: u64) -> Self {
        Self {
            priority_queue: ttl_seconds,
            player_details: ttl_seconds,
            game_server_details: ttl_seconds,
            leaderboard: ttl_seconds,
            whitelist: ttl_seconds,
        }
    }

    pub fn ttl_for(&self, operation: Operation) -> u64 {
        match operation {
            Operation::GameServerDetails => self.game_server_details,
            Operation::PlayerDetails => self.player_details,
            Operation::Leaderboard => self.leaderboard,
            Operation::PriorityQueue => self.priority_queue,
            Operation::Whitelist => self.whitelist,
        }
    }

    pub fn is_cached(&self, operation: Operation) -> bool {
        self.ttl_for(operation) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caches_nothing() {
        let config = CacheTtlConfig::default();
        for op in [
            Operation::GameServerDetails,
            Operation::PlayerDetails,
            Operation::Leaderboard,
            Operation::PriorityQueue,
            Operation::Whitelist,
        ] {
            assert!(!config.is_cached(op), "{} should not be cached", op);
        }
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: CacheTtlConfig =
            serde_json::from_str(r#"{"leaderboard": 30, "playerDetails": 60}"#).unwrap();

        assert_eq!(config.ttl_for(Operation::Leaderboard), 30);
        assert_eq!(config.ttl_for(Operation::PlayerDetails), 60);
        assert_eq!(config.ttl_for(Operation::PriorityQueue), 0);
        assert!(!config.is_cached(Operation::Whitelist));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result = serde_json::from_str::<CacheTtlConfig>(r#"{"leaderbord": 30}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_uniform() {
        let config = CacheTtlConfig::uniform(30);
        assert_eq!(config.ttl_for(Operation::GameServerDetails), 30);
        assert_eq!(config.ttl_for(Operation::Whitelist), 30);
    }
}
