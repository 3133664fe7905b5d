//! Cache Entry Module
//!
//! Defines the structure for individual cached products with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::product::Product;

// == Cache Entry ==
/// A single cached product with its expiry metadata.
///
/// Entries are immutable once created; overwriting a key replaces the whole
/// entry and restarts its TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The scraped product record
    pub product: Product,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(product: Product, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            product,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so an entry is never served as
    /// a hit at or past the moment its TTL fully elapses.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, saturating at zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        let now = current_timestamp_ms();
        self.expires_at.saturating_sub(now)
    }

    /// Returns remaining TTL in whole seconds, for lookup responses.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms() / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn sample_product() -> Product {
        Product::new("Boat Airdopes 141")
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(sample_product(), 60);

        assert_eq!(entry.product.title, "Boat Airdopes 141");
        assert_eq!(entry.expires_at, entry.created_at + 60_000);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        // Create entry with 1 second TTL
        let entry = CacheEntry::new(sample_product(), 1);

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining_seconds() {
        let entry = CacheEntry::new(sample_product(), 10);

        let remaining = entry.ttl_remaining();
        assert!(remaining <= 10);
        assert!(remaining >= 9);
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new(sample_product(), 1);

        sleep(Duration::from_millis(1100));

        // TTL remaining saturates at zero once expired
        assert_eq!(entry.ttl_remaining(), 0);
        assert_eq!(entry.ttl_remaining_ms(), 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            product: sample_product(),
            created_at: now,
            expires_at: now, // Expires exactly at creation time
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
