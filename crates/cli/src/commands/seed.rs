//! Seed a snapshot directory with demo data.
//!
//! Opens the store in file mode, which loads any existing snapshots,
//! seeds the demo catalog and admin account into empty collections, and
//! flushes everything back to disk. Running it against a directory that
//! already holds data is a no-op.

use driftline_server::store::{Store, StoreConfig};

/// Seed the snapshot directory at `data_dir`.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the
/// snapshots cannot be written.
pub async fn run(data_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let store = Store::open(&StoreConfig::file(data_dir))?;
    store.shutdown().await;

    tracing::info!(
        data_dir = %store.data_dir().display(),
        products = store.products().len(),
        users = store.users().len(),
        "snapshots written"
    );
    Ok(())
}
