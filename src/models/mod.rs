//! Request and Response models for the deal gate API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{LookupRequest, StoreRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, HealthResponse, LookupResponse, StatsResponse, StoreResponse,
};
