//! Entity store implementation.
//!
//! `EntityStore<T>` is the per-collection data access object presentation code
//! uses: it lists, creates, updates and removes records through a
//! `CollectionBackend` and keeps an in-memory, newest-first copy of the
//! collection in sync with what the backend returned.
//!
//! # Source of truth
//!
//! After a successful `create` or `update` the cache holds the row the backend
//! handed back, never the payload that was submitted, so server-side defaults,
//! triggers and computed columns show up in the cache.
//!
//! # Write ordering
//!
//! Writes against the same id go through a per-id lane (a fair async mutex):
//! they reach the backend one at a time in the order they were issued, so the
//! last issued write is the last applied and the one left in the cache. Writes
//! against different ids are not ordered relative to each other.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use agency_shared::{Collection, Entity, Record};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::interfaces::CollectionBackend;
use crate::types::{LoadPhase, Operation, Row};

struct StoreState<T> {
    phase: LoadPhase,
    records: Vec<Record<T>>,
    error: Option<StoreError>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Uninitialized,
            records: Vec::new(),
            error: None,
        }
    }
}

/// Cached create/read/update/delete access to one collection.
///
/// Independent stores over the same collection do not share their cache; each
/// one only reflects its own fetches and writes.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use agency_repository::{EntityStore, LocalCollectionBackend};
/// use agency_shared::Content;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = Arc::new(LocalCollectionBackend::open("agency-store.json").await?);
/// let contents: EntityStore<Content> = EntityStore::new(backend);
///
/// let created = contents.create(Content::draft("Launch reel")).await?;
/// let listed = contents.list().await;
/// assert_eq!(listed[0].id, created.id);
/// # Ok(())
/// # }
/// ```
pub struct EntityStore<T: Entity> {
    backend: Arc<dyn CollectionBackend>,
    config: StoreConfig,
    state: RwLock<StoreState<T>>,
    lanes: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityStore<T> {
    /// Create a store with default configuration.
    pub fn new(backend: Arc<dyn CollectionBackend>) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store with custom configuration.
    pub fn with_config(backend: Arc<dyn CollectionBackend>, config: StoreConfig) -> Self {
        Self {
            backend,
            config,
            state: RwLock::new(StoreState::default()),
            lanes: Mutex::new(HashMap::new()),
            _entity: PhantomData,
        }
    }

    /// The collection this store reads and writes.
    pub fn collection(&self) -> Collection {
        T::COLLECTION
    }

    /// Fetch the whole collection, newest first, and replace the cache with it.
    ///
    /// Never fails: when the fetch fails the cache is left untouched, the error
    /// is recorded in the error overlay (see [`EntityStore::last_error`]) and the
    /// last known good list is returned.
    #[instrument(skip(self), fields(collection = %T::COLLECTION))]
    pub async fn list(&self) -> Vec<Record<T>> {
        self.state.write().await.phase = LoadPhase::Loading;

        let fetched = self.fetch().await;

        let mut state = self.state.write().await;
        state.phase = LoadPhase::Ready;
        match fetched {
            Ok(records) => {
                debug!(records = records.len(), "Collection refreshed");
                state.records = records;
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, cached = state.records.len(), "Refresh failed, keeping cached records");
                state.error = Some(err);
            }
        }
        state.records.clone()
    }

    /// Create a record and prepend the backend's copy of it to the cache.
    ///
    /// # Returns
    ///
    /// * `Ok(Record<T>)` - The record as stored, with its assigned id and timestamp
    /// * `Err(StoreError::Persistence)` - If the backend rejected the write
    #[instrument(skip(self, fields), fields(collection = %T::COLLECTION))]
    pub async fn create(&self, fields: T) -> Result<Record<T>, StoreError> {
        let row = self.encode(&fields)?;

        let stored = match self.backend.insert(T::COLLECTION, &row).await {
            Ok(stored) => stored,
            Err(source) => {
                return Err(self
                    .fail(StoreError::persistence(T::COLLECTION, Operation::Create, source))
                    .await)
            }
        };
        let record = match self.decode(stored) {
            Ok(record) => record,
            Err(err) => return Err(self.fail(err).await),
        };

        let mut state = self.state.write().await;
        state.records.insert(0, record.clone());
        state.error = None;
        info!(id = %record.id, "Record created");
        Ok(record)
    }

    /// Apply a partial patch and replace the cached record with the backend's
    /// canonical version (no client-side merge).
    ///
    /// # Arguments
    ///
    /// * `id` - The record to patch
    /// * `patch` - Any value serialising to a JSON object of the columns to change
    ///
    /// # Returns
    ///
    /// * `Ok(Record<T>)` - The record as stored after the patch
    /// * `Err(StoreError::Persistence)` - If the id does not exist or the patch is rejected
    #[instrument(skip(self, patch), fields(collection = %T::COLLECTION, id = %id))]
    pub async fn update<P>(&self, id: Uuid, patch: &P) -> Result<Record<T>, StoreError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let patch = self.encode(patch)?;
        let lane = self.lane(id).await;
        let result = {
            let _turn = lane.lock().await;
            self.apply_update(id, &patch).await
        };
        self.release_lane(id, lane).await;
        result
    }

    /// Delete a record remotely, then drop it from the cache.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the record was deleted
    /// * `Err(StoreError::Persistence)` - If the delete was rejected; use
    ///   [`StoreError::is_referential`] to tell a reference violation apart
    #[instrument(skip(self), fields(collection = %T::COLLECTION, id = %id))]
    pub async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_with(id, false).await
    }

    /// Delete a record after detaching every reference to it, atomically.
    ///
    /// Other stores holding the detached records keep their stale copies until
    /// their next `list`.
    #[instrument(skip(self), fields(collection = %T::COLLECTION, id = %id))]
    pub async fn remove_detaching(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_with(id, true).await
    }

    /// Snapshot of the cached records, newest first.
    pub async fn records(&self) -> Vec<Record<T>> {
        self.state.read().await.records.clone()
    }

    /// The cached record with `id`, if any.
    pub async fn get(&self, id: Uuid) -> Option<Record<T>> {
        self.state
            .read()
            .await
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Cached records matching `predicate`, in cache order.
    pub async fn filter<F>(&self, predicate: F) -> Vec<Record<T>>
    where
        F: Fn(&Record<T>) -> bool,
    {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.read().await.phase
    }

    /// The error overlay: the most recent failure, cleared by the next success.
    pub async fn last_error(&self) -> Option<StoreError> {
        self.state.read().await.error.clone()
    }

    async fn delete_with(&self, id: Uuid, detach: bool) -> Result<(), StoreError> {
        let lane = self.lane(id).await;
        let result = {
            let _turn = lane.lock().await;
            self.apply_delete(id, detach).await
        };
        self.release_lane(id, lane).await;
        result
    }

    async fn apply_update(&self, id: Uuid, patch: &Row) -> Result<Record<T>, StoreError> {
        let stored = match self.backend.update(T::COLLECTION, id, patch).await {
            Ok(stored) => stored,
            Err(source) => {
                return Err(self
                    .fail(StoreError::persistence(T::COLLECTION, Operation::Update, source))
                    .await)
            }
        };
        let record = match self.decode(stored) {
            Ok(record) => record,
            Err(err) => return Err(self.fail(err).await),
        };

        let mut state = self.state.write().await;
        if let Some(cached) = state.records.iter_mut().find(|cached| cached.id == id) {
            *cached = record.clone();
        }
        state.error = None;
        info!("Record updated");
        Ok(record)
    }

    async fn apply_delete(&self, id: Uuid, detach: bool) -> Result<(), StoreError> {
        let result = if detach {
            self.backend.detach_and_delete(T::COLLECTION, id).await
        } else {
            self.backend.delete(T::COLLECTION, id).await
        };
        if let Err(source) = result {
            return Err(self
                .fail(StoreError::persistence(T::COLLECTION, Operation::Delete, source))
                .await);
        }

        let mut state = self.state.write().await;
        state.records.retain(|record| record.id != id);
        state.error = None;
        info!(detached = detach, "Record removed");
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<Record<T>>, StoreError> {
        let rows = self
            .backend
            .select_all(T::COLLECTION)
            .await
            .map_err(|source| StoreError::fetch(T::COLLECTION, source))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match self.decode(row) {
                Ok(record) => records.push(record),
                Err(err) if self.config.skip_invalid_rows => {
                    warn!(error = %err, "Skipping undecodable row");
                }
                Err(err) => return Err(err),
            }
        }
        // Backends already order newest first; the stable sort only repairs ties and clock skew.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn lane(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.lanes.lock().await.entry(id).or_default().clone()
    }

    /// Drops the lane for `id` once no other write holds or awaits it.
    async fn release_lane(&self, id: Uuid, lane: Arc<Mutex<()>>) {
        let mut lanes = self.lanes.lock().await;
        let idle = lanes
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, &lane) && Arc::strong_count(&lane) == 2);
        if idle {
            lanes.remove(&id);
        }
    }

    /// Record `err` in the error overlay and hand it back for propagation.
    async fn fail(&self, err: StoreError) -> StoreError {
        warn!(error = %err, "Store operation failed");
        self.state.write().await.error = Some(err.clone());
        err
    }

    fn encode<P: Serialize + ?Sized>(&self, value: &P) -> Result<Row, StoreError> {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(row)) => Ok(row),
            Ok(other) => Err(StoreError::serialization(
                T::COLLECTION,
                format!("expected an object, got {other}"),
            )),
            Err(err) => Err(StoreError::serialization(T::COLLECTION, err.to_string())),
        }
    }

    fn decode(&self, row: Row) -> Result<Record<T>, StoreError> {
        serde_json::from_value(serde_json::Value::Object(row))
            .map_err(|err| StoreError::serialization(T::COLLECTION, err.to_string()))
    }
}
