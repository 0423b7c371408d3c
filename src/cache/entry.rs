//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// Represents a single cache entry with value and expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stored at `now_ms` that lives for `ttl_seconds`.
    pub fn new(value: V, now_ms: u64, ttl_seconds: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry stays valid up to and including `expires_at`; it is expired
    /// only once the clock is strictly past it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 5_000, 30);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.created_at, 5_000);
        assert_eq!(entry.expires_at, 35_000);
        assert!(!entry.is_expired(5_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new((), 0, 30);

        // Still valid exactly at expires_at
        assert!(!entry.is_expired(30_000));
        assert!(entry.is_expired(30_001));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new((), 1_000, 10);

        assert_eq!(entry.ttl_remaining_ms(1_000), 10_000);
        assert_eq!(entry.ttl_remaining_ms(6_000), 5_000);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new((), 1, u64::MAX);
        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired(u64::MAX));
    }
}
