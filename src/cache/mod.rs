//! Cache Module
//!
//! Generic in-memory key-value store with per-entry TTL and an injectable clock.
//! `CachingClient` keeps API responses in it.

mod clock;
mod entry;
mod stats;
mod store;


pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
