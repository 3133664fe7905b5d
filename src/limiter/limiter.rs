//! Rate Limiter Module
//!
//! Per-user sliding-window rate limiter gating inbound requests before any
//! scraping happens.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::cache::current_timestamp_ms;
use crate::limiter::RequestWindow;

// == Limiter Stats ==
/// Admission counters for observability.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LimiterStats {
    /// Requests admitted
    pub allowed: u64,
    /// Requests denied
    pub denied: u64,
    /// Users with at least one in-window request
    pub tracked_users: usize,
}

// == Rate Limiter ==
/// Sliding-window rate limiter keyed by user id.
///
/// A request is admitted if the user has made fewer than `max_requests`
/// admitted requests within the trailing window. Denials leave the window
/// untouched, so a spamming user does not push their own quota further out.
#[derive(Debug)]
pub struct RateLimiter {
    /// Per-user request windows, created lazily on first request
    windows: HashMap<i64, RequestWindow>,
    /// Window length in milliseconds
    window_ms: u64,
    /// Maximum admitted requests per window
    max_requests: usize,
    /// Requests admitted since startup
    allowed: u64,
    /// Requests denied since startup
    denied: u64,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a new RateLimiter.
    ///
    /// # Arguments
    /// * `window_secs` - Trailing window length in seconds
    /// * `max_requests` - Maximum admitted requests per user per window
    pub fn new(window_secs: u64, max_requests: usize) -> Self {
        Self {
            windows: HashMap::new(),
            window_ms: window_secs * 1000,
            max_requests,
            allowed: 0,
            denied: 0,
        }
    }

    // == Allow ==
    /// Checks whether a request from `user_id` is admitted right now.
    ///
    /// Admission records the request; denial changes nothing.
    pub fn allow(&mut self, user_id: i64) -> bool {
        self.allow_at(user_id, current_timestamp_ms())
    }

    /// Deterministic admission check against an explicit clock.
    ///
    /// `allow` delegates here with the wall clock; tests drive it directly
    /// to simulate time passing.
    pub fn allow_at(&mut self, user_id: i64, now_ms: u64) -> bool {
        let window = self.windows.entry(user_id).or_default();
        window.prune(now_ms, self.window_ms);

        if window.len() < self.max_requests {
            window.record(now_ms);
            self.allowed += 1;
            true
        } else {
            self.denied += 1;
            debug!(user_id = user_id, "request denied by rate limit");
            false
        }
    }

    // == Sweep Idle ==
    /// Drops windows whose every timestamp has aged out.
    ///
    /// Returns the number of users removed. Keeps memory bounded when many
    /// users make a single request and never return.
    pub fn sweep_idle(&mut self) -> usize {
        self.sweep_idle_at(current_timestamp_ms())
    }

    /// Deterministic idle sweep against an explicit clock.
    pub fn sweep_idle_at(&mut self, now_ms: u64) -> usize {
        let before = self.windows.len();
        let window_ms = self.window_ms;
        self.windows.retain(|_, window| {
            window.prune(now_ms, window_ms);
            !window.is_empty()
        });
        before - self.windows.len()
    }

    // == Tracked Users ==
    /// Returns the number of users currently holding a window.
    pub fn tracked_users(&self) -> usize {
        self.windows.len()
    }

    // == Stats ==
    /// Returns current admission counters.
    pub fn stats(&self) -> LimiterStats {
        LimiterStats {
            allowed: self.allowed,
            denied: self.denied,
            tracked_users: self.windows.len(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_SECS: u64 = 60;

    #[test]
    fn test_limiter_admits_under_quota() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 10);

        for _ in 0..10 {
            assert!(limiter.allow(1));
        }
    }

    #[test]
    fn test_limiter_denies_over_quota() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 10);

        for _ in 0..10 {
            assert!(limiter.allow(1));
        }

        // The 11th request within the window is denied
        assert!(!limiter.allow(1));
    }

    #[test]
    fn test_limiter_window_rollover() {
        // quota=2, window=60s: third request denied, admitted again after rollover
        let mut limiter = RateLimiter::new(WINDOW_SECS, 2);

        assert!(limiter.allow_at(1, 0));
        assert!(limiter.allow_at(1, 10_000));
        assert!(!limiter.allow_at(1, 20_000));
        assert!(limiter.allow_at(1, 70_000));
    }

    #[test]
    fn test_limiter_users_do_not_interfere() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 2);

        assert!(limiter.allow_at(1, 0));
        assert!(limiter.allow_at(1, 1_000));
        assert!(!limiter.allow_at(1, 2_000));

        // User 2 is untouched by user 1's exhausted quota
        assert!(limiter.allow_at(2, 2_000));
        assert!(limiter.allow_at(2, 3_000));
    }

    #[test]
    fn test_limiter_denial_does_not_consume_quota() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 1);

        assert!(limiter.allow_at(1, 0));
        // Hammering while denied must not extend the lockout
        assert!(!limiter.allow_at(1, 30_000));
        assert!(!limiter.allow_at(1, 59_000));
        // First request at t=0 ages out at t=60s
        assert!(limiter.allow_at(1, 60_000));
    }

    #[test]
    fn test_limiter_sweep_idle() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 10);

        assert!(limiter.allow_at(1, 0));
        assert!(limiter.allow_at(2, 50_000));
        assert_eq!(limiter.tracked_users(), 2);

        // At t=70s user 1's only request has aged out, user 2's has not
        let removed = limiter.sweep_idle_at(70_000);
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_users(), 1);
    }

    #[test]
    fn test_limiter_stats() {
        let mut limiter = RateLimiter::new(WINDOW_SECS, 1);

        assert!(limiter.allow_at(1, 0));
        assert!(!limiter.allow_at(1, 1_000));

        let stats = limiter.stats();
        assert_eq!(stats.allowed, 1);
        assert_eq!(stats.denied, 1);
        assert_eq!(stats.tracked_users, 1);
    }
}
