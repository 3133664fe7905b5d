//! Rate Limiter Module
//!
//! Per-user sliding-window request limiting.

mod limiter;
mod window;


// Re-export public types
pub use limiter::{LimiterStats, RateLimiter};
pub use window::RequestWindow;
