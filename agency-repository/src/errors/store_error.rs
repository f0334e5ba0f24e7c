//! Entity store error types.

use agency_shared::Collection;
use thiserror::Error;

use super::BackendError;
use crate::types::Operation;

/// Errors surfaced by `EntityStore`.
///
/// Every variant names the collection it came from so presentation code can
/// show a specific message. `Clone` so the latest error can be kept as the
/// store's error overlay.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Refreshing the list failed. Non-fatal: the previous list is kept.
    #[error("Failed to fetch {collection}: {source}")]
    Fetch {
        collection: Collection,
        #[source]
        source: BackendError,
    },

    /// A create, update or delete was rejected by the backend.
    #[error("Failed to {operation} {collection} record: {source}")]
    Persistence {
        collection: Collection,
        operation: Operation,
        #[source]
        source: BackendError,
    },

    /// A record could not be converted to or from a backend row.
    #[error("Invalid {collection} record: {message}")]
    Serialization {
        collection: Collection,
        message: String,
    },
}

/// Coarse classification of a `StoreError`, for choosing how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Persistence,
    /// A persistence error caused by other records still referencing the target.
    Referential,
    Serialization,
}

impl StoreError {
    pub fn fetch(collection: Collection, source: BackendError) -> Self {
        Self::Fetch { collection, source }
    }

    pub fn persistence(collection: Collection, operation: Operation, source: BackendError) -> Self {
        Self::Persistence {
            collection,
            operation,
            source,
        }
    }

    pub fn serialization(collection: Collection, message: impl Into<String>) -> Self {
        Self::Serialization {
            collection,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Fetch { .. } => ErrorKind::Fetch,
            StoreError::Persistence {
                source: BackendError::ReferenceViolation(_),
                ..
            } => ErrorKind::Referential,
            StoreError::Persistence { .. } => ErrorKind::Persistence,
            StoreError::Serialization { .. } => ErrorKind::Serialization,
        }
    }

    /// True for persistence errors, referential ones included.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence { .. })
    }

    /// True when a delete was refused because other records reference the target.
    pub fn is_referential(&self) -> bool {
        self.kind() == ErrorKind::Referential
    }

    pub fn collection(&self) -> Collection {
        match self {
            StoreError::Fetch { collection, .. }
            | StoreError::Persistence { collection, .. }
            | StoreError::Serialization { collection, .. } => *collection,
        }
    }

    /// The write that failed, if this is a persistence error.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StoreError::Persistence { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_kind_classification() {
        let referential = StoreError::persistence(
            Collection::Clients,
            Operation::Delete,
            BackendError::reference_violation("tasks.client_id"),
        );
        assert_eq!(referential.kind(), ErrorKind::Referential);
        assert!(referential.is_persistence());
        assert!(referential.is_referential());
        assert_eq!(referential.operation(), Some(Operation::Delete));

        let missing = StoreError::persistence(
            Collection::Clients,
            Operation::Delete,
            BackendError::NotFound(Uuid::nil()),
        );
        assert_eq!(missing.kind(), ErrorKind::Persistence);
        assert!(!missing.is_referential());

        let fetch = StoreError::fetch(Collection::Tasks, BackendError::connection("refused"));
        assert_eq!(fetch.kind(), ErrorKind::Fetch);
        assert_eq!(fetch.operation(), None);
        assert_eq!(fetch.collection(), Collection::Tasks);
    }

    #[test]
    fn test_message_names_operation() {
        let err = StoreError::persistence(
            Collection::Contents,
            Operation::Update,
            BackendError::rejected("invalid status"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to update contents record: Write rejected: invalid status"
        );
    }
}
