//! dealgate - deal bot cache and rate-limit sidecar
//!
//! Gates product-link lookups behind a per-user rate limit and a short-TTL
//! product cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealgate::api::create_router;
use dealgate::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the deal gate service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create cache and rate limiter with configured parameters
/// 4. Start background cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting deal gate service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_cache_size={}, cache_ttl={}s, rate_limit={}req/{}s, port={}, cleanup_interval={}s",
        config.max_cache_size,
        config.cache_ttl,
        config.rate_limit_max_requests,
        config.rate_limit_window,
        config.server_port,
        config.cleanup_interval
    );

    // Create application state with cache and limiter
    let state = AppState::from_config(&config);
    info!("Cache and rate limiter initialized");

    // Start background cleanup task
    let cleanup_handle = spawn_cleanup_task(
        state.cache.clone(),
        state.limiter.clone(),
        config.cleanup_interval,
    );
    info!("Background cleanup task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the cleanup task
    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
