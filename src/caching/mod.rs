//! Caching Module
//!
//! Read-through caching decorator for `CfToolsClient` implementations.

mod client;
pub mod key;
mod ttl;

pub use client::{CachedResponse, Cacheable, CachingClient, SharedStore};
pub use key::CacheKey;
pub use ttl::{CacheTtlConfig, Operation};
