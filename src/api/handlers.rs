//! API Handlers
//!
//! HTTP request handlers for each deal gate endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::ProductCache;
use crate::config::Config;
use crate::error::{GateError, Result};
use crate::limiter::RateLimiter;
use crate::models::{
    DeleteResponse, HealthResponse, LookupRequest, LookupResponse, StatsResponse, StoreRequest,
    StoreResponse,
};
use crate::product::NormalizedLink;

/// Application state shared across all handlers.
///
/// The cache and limiter each live behind their own lock; every mutating
/// path (including lookup, which lazily expires entries and counts stats)
/// takes the write side.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe product cache
    pub cache: Arc<RwLock<ProductCache>>,
    /// Thread-safe rate limiter
    pub limiter: Arc<RwLock<RateLimiter>>,
}

impl AppState {
    /// Creates a new AppState from freshly constructed components.
    pub fn new(cache: ProductCache, limiter: RateLimiter) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RwLock::new(limiter)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = ProductCache::new(config.max_cache_size, config.cache_ttl);
        let limiter = RateLimiter::new(config.rate_limit_window, config.rate_limit_max_requests);
        Self::new(cache, limiter)
    }
}

/// Handler for POST /lookup
///
/// The full inbound gate: rate check, link normalization, cache lookup.
/// A miss responds 200 with the cache key the caller should store under
/// after scraping; only denials and bad links are errors.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<LookupResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GateError::InvalidRequest(error_msg));
    }

    {
        let mut limiter = state.limiter.write().await;
        if !limiter.allow(req.user_id) {
            info!(user_id = req.user_id, "lookup denied by rate limit");
            return Err(GateError::RateLimited(req.user_id));
        }
    }

    let link = NormalizedLink::from_raw(&req.url)?;

    let mut cache = state.cache.write().await;
    match cache.get(&link.cache_key) {
        Ok(hit) => Ok(Json(LookupResponse::hit(&link, hit))),
        Err(GateError::NotFound(_)) | Err(GateError::Expired(_)) => {
            Ok(Json(LookupResponse::miss(&link)))
        }
        Err(e) => Err(e),
    }
}

/// Handler for PUT /store
///
/// Caches a scraped product under the key a prior lookup miss returned.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GateError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.insert(req.key.clone(), req.product)?;

    Ok(Json(StoreResponse::new(req.key)))
}

/// Handler for DELETE /cache/:key
///
/// Drops one cached product, e.g. before an admin-triggered re-fetch.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    cache.remove(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns cache and limiter counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache_stats = state.cache.read().await.stats();
    let limiter_stats = state.limiter.read().await.stats();

    Json(StatsResponse::new(cache_stats, limiter_stats))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
