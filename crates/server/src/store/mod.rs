//! Generic record store with optional JSON snapshot persistence.
//!
//! The store owns four named collections (products, users, carts,
//! orders), each an insertion-ordered `Vec` behind a single `RwLock`.
//! Lookups are linear scans; the demo-scale data set makes an index
//! pointless. All reads hand out owned copies, so callers can only
//! affect stored state through the explicit mutation calls.
//!
//! # Persistence
//!
//! Two modes: pure in-memory (flushing is a no-op) and snapshot-to-file,
//! where every mutation schedules a whole-collection rewrite of the
//! matching JSON array document under the data directory. Flushes are
//! fire-and-forget: requests go through a bounded channel into a
//! background task, a full queue drops the request (a queued flush
//! writes the latest state anyway), and a failed write is retried once
//! before being dropped with a warning. In-memory state is the source of
//! truth for the running process; a flush failure never reaches the
//! mutating caller.
//!
//! The store is an explicitly constructed handle passed to repositories,
//! not a process-wide singleton, which keeps tests hermetic.

mod seed;
mod snapshot;

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::models::{Cart, Order, Product, User};

/// How many pending flush requests the queue holds before dropping.
const FLUSH_QUEUE_CAPACITY: usize = 64;

/// Persistence mode for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Keep everything in memory; flushing is a no-op.
    #[default]
    Memory,
    /// Snapshot each collection to a JSON file on every mutation.
    File,
}

impl PersistMode {
    /// The mode name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for PersistMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(format!("unknown persistence mode '{other}'")),
        }
    }
}

/// Store construction options.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub mode: PersistMode,
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// In-memory store, mostly for tests and the default deployment.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            mode: PersistMode::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }

    /// File-backed store snapshotting into `data_dir`.
    #[must_use]
    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: PersistMode::File,
            data_dir: data_dir.into(),
        }
    }
}

/// Errors raised while opening the store.
///
/// Only startup can fail; mutation-time persistence errors are swallowed
/// by the flush worker and logged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory state: one insertion-ordered collection per entity type.
#[derive(Debug, Default)]
pub struct StoreState {
    pub(crate) products: Vec<Product>,
    pub(crate) users: Vec<User>,
    pub(crate) carts: Vec<Cart>,
    pub(crate) orders: Vec<Order>,
}

/// Binds an entity type to its collection in the store.
///
/// `Draft` is what callers supply to create a record (the store stamps
/// the id and timestamps itself); `Patch` is an all-optional partial
/// update applied field by field, last write wins, with `id` immutable.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + Send + Sync;
    type Draft: Send;
    type Patch: Send;

    /// Collection name; also the snapshot file stem.
    const COLLECTION: &'static str;

    fn generate_id() -> Self::Id;
    fn build(id: Self::Id, now: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn id(&self) -> &Self::Id;
    fn apply_patch(&mut self, patch: Self::Patch);
    fn touch(&mut self, now: DateTime<Utc>);
    fn slot(state: &StoreState) -> &Vec<Self>;
    fn slot_mut(state: &mut StoreState) -> &mut Vec<Self>;
}

struct StoreInner {
    mode: PersistMode,
    data_dir: PathBuf,
    state: Arc<RwLock<StoreState>>,
    /// Present only in file mode; the receiving end lives in the flush task.
    flush_tx: Option<mpsc::Sender<&'static str>>,
}

/// Handle to the record store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Open a store.
    ///
    /// In file mode this creates the data directory, loads any existing
    /// snapshot files (a missing file is an empty collection; a corrupt
    /// one is skipped with a warning) and spawns the background flush
    /// task, so it must be called within a tokio runtime. If the
    /// products or users collection is empty after loading, the demo
    /// seed data is inserted and flushed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory cannot be created.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let state = if config.mode == PersistMode::File {
            std::fs::create_dir_all(&config.data_dir)?;
            snapshot::load_state(&config.data_dir)
        } else {
            StoreState::default()
        };

        let needs_seed = state.products.is_empty() || state.users.is_empty();
        let state = Arc::new(RwLock::new(state));

        let flush_tx = match config.mode {
            PersistMode::Memory => None,
            PersistMode::File => {
                let (tx, rx) = mpsc::channel(FLUSH_QUEUE_CAPACITY);
                tokio::spawn(snapshot::run_flusher(
                    Arc::clone(&state),
                    config.data_dir.clone(),
                    rx,
                ));
                Some(tx)
            }
        };

        let store = Self {
            inner: Arc::new(StoreInner {
                mode: config.mode,
                data_dir: config.data_dir.clone(),
                state,
                flush_tx,
            }),
        };

        if needs_seed {
            seed::seed(&store);
        }

        Ok(store)
    }

    /// Current persistence mode.
    #[must_use]
    pub fn mode(&self) -> PersistMode {
        self.inner.mode
    }

    /// Directory holding the snapshot files (meaningful in file mode).
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// The products collection.
    #[must_use]
    pub fn products(&self) -> Collection<'_, Product> {
        self.collection()
    }

    /// The users collection.
    #[must_use]
    pub fn users(&self) -> Collection<'_, User> {
        self.collection()
    }

    /// The carts collection.
    #[must_use]
    pub fn carts(&self) -> Collection<'_, Cart> {
        self.collection()
    }

    /// The orders collection.
    #[must_use]
    pub fn orders(&self) -> Collection<'_, Order> {
        self.collection()
    }

    /// Typed handle to an entity's collection.
    #[must_use]
    pub fn collection<T: Entity>(&self) -> Collection<'_, T> {
        Collection {
            store: self,
            _entity: std::marker::PhantomData,
        }
    }

    /// Write every collection out once, best effort, logging failures.
    ///
    /// Called on graceful shutdown so the snapshot on disk is not left
    /// behind by a dropped fire-and-forget flush. A no-op in memory mode.
    pub async fn shutdown(&self) {
        if self.inner.mode != PersistMode::File {
            return;
        }
        snapshot::flush_all(&self.inner.state, &self.inner.data_dir).await;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn schedule_flush(&self, collection: &'static str) {
        if let Some(tx) = &self.inner.flush_tx
            && tx.try_send(collection).is_err()
        {
            // Queue full (or shutting down): the pending flush for this
            // collection will write the latest state when it runs.
            tracing::debug!(collection, "flush queue full, dropping request");
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("mode", &self.inner.mode)
            .field("data_dir", &self.inner.data_dir)
            .finish_non_exhaustive()
    }
}

/// Typed view over one collection of the store.
#[derive(Debug)]
pub struct Collection<'a, T: Entity> {
    store: &'a Store,
    _entity: std::marker::PhantomData<T>,
}

impl<T: Entity> Collection<'_, T> {
    /// All records, in insertion order. Returns copies.
    #[must_use]
    pub fn all(&self) -> Vec<T> {
        T::slot(&self.store.read_state()).clone()
    }

    /// Records matching the predicate, in insertion order.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        T::slot(&self.store.read_state())
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }

    /// Record with the given id, if present. O(n) scan.
    #[must_use]
    pub fn find_by_id(&self, id: &T::Id) -> Option<T> {
        T::slot(&self.store.read_state())
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// First record matching the predicate, in insertion order.
    #[must_use]
    pub fn find_one(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        T::slot(&self.store.read_state())
            .iter()
            .find(|r| pred(r))
            .cloned()
    }

    /// Create a record from a draft: allocates a fresh id, stamps both
    /// timestamps, appends to the collection and schedules a flush.
    pub fn create(&self, draft: T::Draft) -> T {
        let record = T::build(T::generate_id(), Utc::now(), draft);
        {
            let mut state = self.store.write_state();
            T::slot_mut(&mut state).push(record.clone());
        }
        self.store.schedule_flush(T::COLLECTION);
        record
    }

    /// Merge a partial patch onto the record with the given id.
    ///
    /// Fields absent from the patch are untouched; `updated_at` is
    /// refreshed even when no field value actually changed; `id` is
    /// immutable. Returns the updated record, or `None` (without a
    /// flush) when the id is unknown.
    pub fn update(&self, id: &T::Id, patch: T::Patch) -> Option<T> {
        let updated = {
            let mut state = self.store.write_state();
            let record = T::slot_mut(&mut state).iter_mut().find(|r| r.id() == id)?;
            record.apply_patch(patch);
            record.touch(Utc::now());
            record.clone()
        };
        self.store.schedule_flush(T::COLLECTION);
        Some(updated)
    }

    /// Delete the record with the given id. Returns whether anything was
    /// removed; flushes only when it was.
    pub fn remove(&self, id: &T::Id) -> bool {
        let removed = {
            let mut state = self.store.write_state();
            let slot = T::slot_mut(&mut state);
            let before = slot.len();
            slot.retain(|r| r.id() != id);
            slot.len() != before
        };
        if removed {
            self.store.schedule_flush(T::COLLECTION);
        }
        removed
    }

    /// Number of records in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        T::slot(&self.store.read_state()).len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use crate::models::{ProductDraft, ProductPatch};

    use super::*;

    fn empty_store() -> Store {
        // Seeding skips stores that already hold data; tests that want a
        // blank slate remove the seed records first.
        let store = Store::open(&StoreConfig::in_memory()).unwrap();
        for p in store.products().all() {
            store.products().remove(&p.id);
        }
        store
    }

    fn draft(name: &str, price: Decimal) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            sku: format!("SKU-{name}"),
            price,
            currency: "USD".to_owned(),
            stock: 10,
            images: Vec::new(),
            description: String::new(),
            category: String::new(),
            tags: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn create_allocates_unique_ids() {
        let store = empty_store();
        let a = store.products().create(draft("a", Decimal::new(100, 2)));
        let b = store.products().create(draft("b", Decimal::new(200, 2)));
        assert_ne!(a.id, b.id);
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn update_merges_partial_fields_only() {
        let store = empty_store();
        let created = store.products().create(draft("tee", Decimal::new(2499, 2)));

        std::thread::sleep(Duration::from_millis(2));
        let updated = store
            .products()
            .update(
                &created.id,
                ProductPatch {
                    stock: Some(5),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        // Only the patched field changed; the id stayed put.
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn update_refreshes_timestamp_even_without_changes() {
        let store = empty_store();
        let created = store.products().create(draft("tee", Decimal::new(2499, 2)));

        std::thread::sleep(Duration::from_millis(2));
        let updated = store
            .products()
            .update(&created.id, ProductPatch::default())
            .unwrap();

        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let store = empty_store();
        let missing = driftline_core::ProductId::from("prod_missing");
        assert!(
            store
                .products()
                .update(&missing, ProductPatch::default())
                .is_none()
        );
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let store = empty_store();
        store.products().create(draft("keep", Decimal::ONE));
        let before = store.products().len();

        let missing = driftline_core::ProductId::from("prod_missing");
        assert!(!store.products().remove(&missing));
        assert_eq!(store.products().len(), before);
    }

    #[test]
    fn remove_existing_id_deletes_the_record() {
        let store = empty_store();
        let p = store.products().create(draft("gone", Decimal::ONE));
        assert!(store.products().remove(&p.id));
        assert!(store.products().find_by_id(&p.id).is_none());
    }

    #[test]
    fn find_preserves_insertion_order() {
        let store = empty_store();
        let names = ["first", "second", "third"];
        for name in names {
            store.products().create(draft(name, Decimal::ONE));
        }

        let listed: Vec<String> = store.products().all().into_iter().map(|p| p.name).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn find_one_returns_first_match() {
        let store = empty_store();
        store.products().create(draft("dup", Decimal::ONE));
        let first = store.products().find_one(|p| p.name == "dup").unwrap();
        store.products().create(draft("dup", Decimal::TWO));

        let found = store.products().find_one(|p| p.name == "dup").unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn memory_store_seeds_demo_data_once() {
        let store = Store::open(&StoreConfig::in_memory()).unwrap();
        assert_eq!(store.products().len(), 3);
        assert_eq!(store.users().len(), 1);

        let admin = store.users().all().remove(0);
        assert!(admin.role.is_admin());
        assert_eq!(
            admin.password_hash,
            crate::models::user::DEMO_PASSWORD_SENTINEL
        );
    }
}
