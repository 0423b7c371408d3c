//! CFTools Client - CFTools Cloud API client with response caching
//!
//! Provides player lookup, priority queue and whitelist management,
//! leaderboards and game server status, plus a read-through TTL cache that
//! wraps any client implementation.

pub mod builder;
pub mod cache;
pub mod caching;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod tasks;

pub use builder::{BuiltClient, CfToolsClientBuilder};
pub use caching::{CacheTtlConfig, CachingClient};
pub use client::CfToolsClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use tasks::spawn_cleanup_task;
