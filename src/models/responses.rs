//! Response DTOs for the deal gate API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheHit, CacheStats};
use crate::limiter::LimiterStats;
use crate::product::{NormalizedLink, Platform, Product};

/// Response body for the lookup operation (POST /lookup)
///
/// A miss is a normal outcome, not an error: the caller scrapes the product
/// and stores it under `key`.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// "hit" or "miss"
    pub status: String,
    /// Cache key for this link
    pub key: String,
    /// Detected platform
    pub platform: Platform,
    /// Cleaned URL with tracking parameters removed
    pub cleaned_url: String,
    /// Cached product, present on a hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Seconds the cached product stays fresh, present on a hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_remaining: Option<u64>,
}

impl LookupResponse {
    /// Creates a hit response from a normalized link and cache hit.
    pub fn hit(link: &NormalizedLink, hit: CacheHit) -> Self {
        Self {
            status: "hit".to_string(),
            key: link.cache_key.clone(),
            platform: link.platform,
            cleaned_url: link.cleaned.clone(),
            product: Some(hit.product),
            ttl_remaining: Some(hit.ttl_remaining),
        }
    }

    /// Creates a miss response from a normalized link.
    pub fn miss(link: &NormalizedLink) -> Self {
        Self {
            status: "miss".to_string(),
            key: link.cache_key.clone(),
            platform: link.platform,
            cleaned_url: link.cleaned.clone(),
            product: None,
            ttl_remaining: None,
        }
    }
}

/// Response body for the store operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Product stored under '{}'", key),
            key,
        }
    }
}

/// Response body for the delete operation (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache counters
    pub cache: CacheStatsBody,
    /// Limiter counters
    pub limiter: LimiterStats,
}

/// Cache section of the stats response, with the derived hit rate.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from core statistics.
    pub fn new(cache: CacheStats, limiter: LimiterStats) -> Self {
        Self {
            cache: CacheStatsBody {
                hits: cache.hits,
                misses: cache.misses,
                evictions: cache.evictions,
                total_entries: cache.total_entries,
                hit_rate: cache.hit_rate(),
            },
            limiter,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> NormalizedLink {
        NormalizedLink::from_raw("https://www.amazon.in/dp/B0ABCDEFGH").unwrap()
    }

    #[test]
    fn test_lookup_hit_serialize() {
        let hit = CacheHit {
            product: Product::new("Kettle").with_price(899),
            ttl_remaining: 280,
        };
        let resp = LookupResponse::hit(&sample_link(), hit);
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"status\":\"hit\""));
        assert!(json.contains("amazon:B0ABCDEFGH"));
        assert!(json.contains("Kettle"));
        assert!(json.contains("\"ttl_remaining\":280"));
    }

    #[test]
    fn test_lookup_miss_serialize_omits_product() {
        let resp = LookupResponse::miss(&sample_link());
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"status\":\"miss\""));
        assert!(!json.contains("\"product\""));
        assert!(!json.contains("\"ttl_remaining\""));
    }

    #[test]
    fn test_store_response_serialize() {
        let resp = StoreResponse::new("amazon:B0ABCDEFGH");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("amazon:B0ABCDEFGH"));
        assert!(json.contains("stored"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("amazon:B0ABCDEFGH");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let cache = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
        };
        let resp = StatsResponse::new(cache, LimiterStats::default());
        assert!((resp.cache.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
