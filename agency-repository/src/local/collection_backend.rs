use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use agency_shared::{Collection, OnDetach};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::BackendError;
use crate::interfaces::CollectionBackend;
use crate::types::{Row, IMMUTABLE_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    /// Insertion sequence, the tie-break for rows created in the same instant.
    seq: u64,
    row: Row,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalState {
    next_seq: u64,
    collections: BTreeMap<Collection, Vec<StoredRow>>,
}

impl LocalState {
    fn rows(&self, collection: Collection) -> &[StoredRow] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn rows_mut(&mut self, collection: Collection) -> &mut Vec<StoredRow> {
        self.collections.entry(collection).or_default()
    }

    fn contains(&self, collection: Collection, id: Uuid) -> bool {
        self.rows(collection).iter().any(|stored| row_has_id(&stored.row, id))
    }

    /// First row in another collection still pointing at `collection/id`.
    fn find_reference(&self, collection: Collection, id: Uuid) -> Option<String> {
        collection.referenced_by().find_map(|key| {
            self.rows(key.collection)
                .iter()
                .any(|stored| column_refers_to(&stored.row, key.column, id))
                .then(|| {
                    format!(
                        "{collection} {id} is still referenced from {}.{}",
                        key.collection, key.column
                    )
                })
        })
    }
}

fn id_value(id: Uuid) -> Value {
    Value::String(id.to_string())
}

fn row_has_id(row: &Row, id: Uuid) -> bool {
    row.get("id") == Some(&id_value(id))
}

fn column_refers_to(row: &Row, column: &str, id: Uuid) -> bool {
    row.get(column) == Some(&id_value(id))
}

/// Refuses rows that would no longer decode as the collection's entity type.
fn check_schema(collection: Collection, row: &Row) -> Result<(), BackendError> {
    collection
        .validate_row(row)
        .map_err(|err| BackendError::rejected(format!("invalid {collection} row: {err}")))
}

fn parse_id(value: &Value) -> Result<Uuid, BackendError> {
    value
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| BackendError::rejected(format!("id must be a UUID string, got {value}")))
}

/// File-backed (or purely in-memory) collection store.
///
/// All writes happen under one write lock and are staged on a copy of the
/// state: the copy replaces the live state only once it has been persisted,
/// so a failed write (or a failed file write) leaves nothing half-applied.
pub struct LocalCollectionBackend {
    path: Option<PathBuf>,
    state: RwLock<LocalState>,
}

impl LocalCollectionBackend {
    /// An empty store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(LocalState::default()),
        }
    }

    /// Opens the store persisted at `path`, starting empty if the file does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(LocalCollectionBackend)` - Store loaded from disk (or empty)
    /// * `Err(BackendError::Serialization)` - If the file exists but is not a valid store
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalState::default(),
            Err(err) => return Err(err.into()),
        };

        info!(path = %path.display(), "Opened local store");
        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write `staged` to disk (if file-backed) and make it the live state.
    async fn commit(&self, live: &mut LocalState, staged: LocalState) -> Result<(), BackendError> {
        if let Some(path) = &self.path {
            let encoded = serde_json::to_vec_pretty(&staged)?;
            let temp = path.with_extension("tmp");
            tokio::fs::write(&temp, encoded).await?;
            tokio::fs::rename(&temp, path).await?;
        }
        *live = staged;
        Ok(())
    }
}

#[async_trait]
impl CollectionBackend for LocalCollectionBackend {
    async fn select_all(&self, collection: Collection) -> Result<Vec<Row>, BackendError> {
        let state = self.state.read().await;
        let mut rows: Vec<&StoredRow> = state.rows(collection).iter().collect();
        rows.sort_by(|a, b| {
            let created = |stored: &StoredRow| {
                stored
                    .row
                    .get("created_at")
                    .and_then(Value::as_str)
                    .and_then(|raw| raw.parse::<chrono::DateTime<Utc>>().ok())
            };
            created(b).cmp(&created(a)).then(b.seq.cmp(&a.seq))
        });

        Ok(rows.into_iter().map(|stored| stored.row.clone()).collect())
    }

    #[instrument(skip(self, fields), fields(collection = %collection))]
    async fn insert(&self, collection: Collection, fields: &Row) -> Result<Row, BackendError> {
        let mut live = self.state.write().await;
        let mut staged = live.clone();

        let id = match fields.get("id") {
            Some(value) => parse_id(value)?,
            None => Uuid::new_v4(),
        };
        if staged.contains(collection, id) {
            return Err(BackendError::rejected(format!(
                "duplicate key: {collection} {id} already exists"
            )));
        }

        let mut row = fields.clone();
        row.insert("id".to_string(), id_value(id));
        row.insert("created_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        check_schema(collection, &row)?;

        let seq = staged.next_seq;
        staged.next_seq += 1;
        staged.rows_mut(collection).push(StoredRow {
            seq,
            row: row.clone(),
        });

        self.commit(&mut live, staged).await?;
        debug!(id = %id, "Inserted row");
        Ok(row)
    }

    #[instrument(skip(self, patch), fields(collection = %collection, id = %id))]
    async fn update(&self, collection: Collection, id: Uuid, patch: &Row) -> Result<Row, BackendError> {
        if let Some(column) = patch.keys().find(|key| IMMUTABLE_COLUMNS.contains(&key.as_str())) {
            return Err(BackendError::rejected(format!("column {column} is immutable")));
        }

        let mut live = self.state.write().await;
        let mut staged = live.clone();

        let stored = staged
            .rows_mut(collection)
            .iter_mut()
            .find(|stored| row_has_id(&stored.row, id))
            .ok_or(BackendError::NotFound(id))?;
        for (column, value) in patch {
            stored.row.insert(column.clone(), value.clone());
        }
        stored
            .row
            .insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        let row = stored.row.clone();
        check_schema(collection, &row)?;

        self.commit(&mut live, staged).await?;
        Ok(row)
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        let mut live = self.state.write().await;
        if !live.contains(collection, id) {
            return Err(BackendError::NotFound(id));
        }
        if let Some(reference) = live.find_reference(collection, id) {
            return Err(BackendError::reference_violation(reference));
        }

        let mut staged = live.clone();
        staged
            .rows_mut(collection)
            .retain(|stored| !row_has_id(&stored.row, id));

        self.commit(&mut live, staged).await
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn detach_and_delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        let mut live = self.state.write().await;
        if !live.contains(collection, id) {
            return Err(BackendError::NotFound(id));
        }
        let mut staged = live.clone();

        let mut pending = vec![(collection, id)];
        let mut doomed = Vec::new();
        while let Some((current, current_id)) = pending.pop() {
            for key in current.referenced_by().filter(|key| key.on_detach == OnDetach::Delete) {
                let children = staged
                    .rows(key.collection)
                    .iter()
                    .filter(|stored| column_refers_to(&stored.row, key.column, current_id))
                    .filter_map(|stored| stored.row.get("id").and_then(|value| parse_id(value).ok()));
                pending.extend(children.map(|child| (key.collection, child)).collect::<Vec<_>>());
            }
            doomed.push((current, current_id));
        }

        for (current, current_id) in doomed.into_iter().rev() {
            for key in current.referenced_by().filter(|key| key.on_detach == OnDetach::Nullify) {
                for stored in staged.rows_mut(key.collection) {
                    if column_refers_to(&stored.row, key.column, current_id) {
                        stored.row.insert(key.column.to_string(), Value::Null);
                    }
                }
            }
            staged
                .rows_mut(current)
                .retain(|stored| !row_has_id(&stored.row, current_id));
        }

        self.commit(&mut live, staged).await
    }
}
