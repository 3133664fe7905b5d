//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of products the cache can hold
    pub max_cache_size: usize,
    /// TTL in seconds applied to every cached product
    pub cache_ttl: u64,
    /// Trailing rate-limit window in seconds
    pub rate_limit_window: u64,
    /// Maximum requests per user within one window
    pub rate_limit_max_requests: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Maximum cached products (default: 1000)
    /// - `CACHE_TTL` - Product TTL in seconds (default: 300)
    /// - `RATE_LIMIT_WINDOW` - Window length in seconds (default: 60)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_cache_size: env::var("MAX_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            rate_limit_window: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: 1000,
            cache_ttl: 300,
            rate_limit_window: 60,
            rate_limit_max_requests: 10,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
