//! API Module
//!
//! HTTP handlers and routing for the deal gate REST API.
//!
//! # Endpoints
//! - `POST /lookup` - Rate-check a user and look a product link up in the cache
//! - `PUT /store` - Cache a scraped product
//! - `DELETE /cache/:key` - Drop one cached product
//! - `GET /stats` - Get cache and limiter statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
