//! dealgate - the gatekeeping core of an e-commerce deal bot
//!
//! Provides a bounded TTL product cache, a per-user sliding-window rate
//! limiter, and product link normalization, exposed over a small HTTP API
//! for the message-handling bot to drive.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod product;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
