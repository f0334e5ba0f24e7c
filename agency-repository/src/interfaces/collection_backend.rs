//! Collection backend trait definition.

use agency_shared::Collection;
use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::BackendError;
use crate::types::Row;

/// Abstracts the remote store holding the dashboard's collections.
///
/// A backend answers exactly the row-level operations below; all filtering and
/// sorting beyond "newest first" happens in the caller over the full list.
/// Implementations are injected into `EntityStore` so tests can swap in mocks.
#[async_trait]
pub trait CollectionBackend: Send + Sync {
    /// Fetch every row of `collection`, ordered by `created_at` descending.
    async fn select_all(&self, collection: Collection) -> Result<Vec<Row>, BackendError>;

    /// Insert a row and return it as stored, including the assigned `id` and
    /// `created_at` and any column defaults.
    async fn insert(&self, collection: Collection, fields: &Row) -> Result<Row, BackendError>;

    /// Apply a partial patch to the row with `id` and return the canonical row.
    ///
    /// # Returns
    ///
    /// * `Ok(Row)` - The row as stored after the patch
    /// * `Err(BackendError::NotFound)` - If no row has this id
    /// * `Err(BackendError::Rejected)` - If the patch touches immutable columns or violates a constraint
    async fn update(&self, collection: Collection, id: Uuid, patch: &Row) -> Result<Row, BackendError>;

    /// Delete the row with `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the row was deleted
    /// * `Err(BackendError::NotFound)` - If no row has this id
    /// * `Err(BackendError::ReferenceViolation)` - If other rows still reference it
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError>;

    /// Delete the row with `id` after detaching everything that references it,
    /// as one atomic operation.
    ///
    /// Nullable references are set to null; owned rows (see
    /// `agency_shared::OnDetach::Delete`) are detached and deleted first. If any
    /// step fails nothing is applied.
    async fn detach_and_delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError>;
}
