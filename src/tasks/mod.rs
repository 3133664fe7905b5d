//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Cleanup: removes expired cache entries and idle rate-limit windows at
//!   configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
