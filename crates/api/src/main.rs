use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbroker_api::config::ServerConfig;
use workbroker_api::correlator::ResponseCorrelator;
use workbroker_api::notifications::{HttpConfirmer, NotificationRouter};
use workbroker_api::queue::HttpWorkQueue;
use workbroker_api::router::build_app_router;
use workbroker_api::state::AppState;
use workbroker_api::ws;
use workbroker_cache::{CacheGateway, MemoryStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workbroker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, sandbox_id = %config.sandbox_id, "Loaded server configuration");

    // --- Cache gateway ---
    // The store behind the gateway is pluggable; the in-process store
    // serves single-node deployments and keeps the external engine out of
    // this binary's concerns.
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(
        CacheGateway::new(store, config.sandbox_id.clone())
            .with_ttl(Duration::from_secs(config.cache_ttl_secs)),
    );
    tracing::info!(ttl_secs = config.cache_ttl_secs, "Cache gateway created");

    // --- Client hub + heartbeat ---
    let hub = Arc::new(ws::ClientHub::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&hub));

    // --- Worker queue ---
    let queue = Arc::new(HttpWorkQueue::new(config.worker_queue_url.clone()));
    tracing::info!(endpoint = %config.worker_queue_url, "Worker queue created");

    // --- Correlator + notification router ---
    let correlator = Arc::new(ResponseCorrelator::new(
        Arc::clone(&cache),
        Arc::clone(&hub),
    ));
    let notifications = Arc::new(NotificationRouter::new(
        Arc::new(HttpConfirmer::new()),
        Arc::clone(&correlator),
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        cache,
        hub: Arc::clone(&hub),
        queue,
        correlator,
        notifications,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let count = hub.connection_count().await;
    tracing::info!(count, "Closing remaining WebSocket connections");
    hub.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
