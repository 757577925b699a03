//! Integration tests for Driftline.
//!
//! Each test spins up a full server on an ephemeral port with an
//! in-memory (or tempdir-backed) store and drives it over HTTP with
//! reqwest. No external services are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftline-integration-tests
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;

use driftline_server::app;
use driftline_server::config::ServerConfig;
use driftline_server::state::AppState;
use driftline_server::store::{Store, StoreConfig};

/// A running server instance plus an HTTP client pointed at it.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    /// Shared state of the running server, for flushing snapshots or
    /// inspecting the store directly.
    pub state: AppState,
}

impl TestContext {
    /// Start a server with an in-memory store on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot be bound; tests have no way to
    /// recover from that.
    pub async fn new() -> Self {
        Self::with_store_config(StoreConfig::in_memory()).await
    }

    /// Start a server with a file-backed store in `data_dir`.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot be bound.
    pub async fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_store_config(StoreConfig::file(data_dir)).await
    }

    async fn with_store_config(store_config: StoreConfig) -> Self {
        let config = ServerConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            persist: store_config.mode,
            data_dir: store_config.data_dir.clone(),
            jwt_secret: SecretString::from("k9Qz2mXv7Lp4Rc8tWn3bYf6Hd1Gj5sAe"),
            frontend_origin: "http://localhost:3000".to_owned(),
        };

        #[allow(clippy::unwrap_used)]
        let store = Store::open(&store_config).unwrap();
        let state = AppState::new(config, store);
        let router = app::build(state.clone());

        #[allow(clippy::unwrap_used)]
        let listener = tokio::net::TcpListener::bind(SocketAddr::from((
            Ipv4Addr::LOCALHOST,
            0,
        )))
        .await
        .unwrap();
        #[allow(clippy::unwrap_used)]
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            // The task ends when the test's runtime shuts down.
            let _ = axum::serve(listener, router).await;
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Build a full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
