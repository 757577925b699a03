//! Driftline - demo e-commerce REST backend.
//!
//! Serves the JSON API on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - In-memory record store, optionally snapshotted to JSON files
//! - Bearer-token (JWT) authentication, argon2 password hashing
//!
//! Persistence is selected with `DATA_PERSIST=memory|file`; in file
//! mode collections are flushed to `DATA_DIR` in the background and
//! once more on shutdown.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use driftline_server::app;
use driftline_server::config::ServerConfig;
use driftline_server::state::AppState;
use driftline_server::store::Store;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "driftline_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Open the record store (loads snapshots in file mode, seeds demo data)
    let store = Store::open(&config.store_config()).expect("Failed to open record store");
    tracing::info!(
        mode = %store.mode(),
        data_dir = %store.data_dir().display(),
        "record store ready"
    );

    let state = AppState::new(config.clone(), store);
    let app = app::build(state.clone());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("driftline listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Flush pending snapshots before exiting.
    state.store().shutdown().await;
    tracing::info!("record store flushed, exiting");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
