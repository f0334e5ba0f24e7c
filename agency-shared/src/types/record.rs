//! The generic record envelope shared by every entity type.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;

/// Label shown in place of a reference that no longer resolves.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// The domain fields of one business entity type.
///
/// Implementors are the payload of a `Record`: they never carry `id` or
/// `created_at`, which are assigned by the backend at creation.
pub trait Entity: Debug + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection records of this type live in.
    const COLLECTION: Collection;

    /// A short human-readable label (name or title).
    fn label(&self) -> &str;
}

/// One persisted entity: backend-assigned identity plus typed fields.
///
/// Columns returned by the backend that are not part of `T` (server-computed
/// timestamps, columns added by a migration) are kept in `extra`, so a record
/// decoded from a backend row serialises back to the same row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: T,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<T: Entity> Record<T> {
    /// Build a record with no extra columns.
    pub fn new(id: Uuid, created_at: DateTime<Utc>, fields: T) -> Self {
        Self {
            id,
            created_at,
            fields,
            extra: serde_json::Map::new(),
        }
    }

    /// The record's label, delegated to its fields.
    pub fn label(&self) -> &str {
        self.fields.label()
    }

    /// An extra column returned by the backend, if present.
    pub fn extra_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Resolve a loose reference to a label, falling back to [`UNASSIGNED_LABEL`]
/// when the id is absent or dangling.
pub fn label_or_unassigned<'a, T: Entity>(records: &'a [Record<T>], id: Option<&Uuid>) -> &'a str {
    id.and_then(|id| records.iter().find(|record| &record.id == id))
        .map(|record| record.label())
        .unwrap_or(UNASSIGNED_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Client, ClientStatus, Content, ContentStatus};
    use serde_json::json;

    #[test]
    fn test_record_keeps_unknown_columns() {
        let row = json!({
            "id": "7d3c0c52-5b44-4d61-9d8e-0d8f4e3d2a11",
            "created_at": "2025-03-01T12:00:00Z",
            "updated_at": "2025-03-02T08:30:00Z",
            "title": "Launch reel",
            "status": "pending",
        });

        let record: Record<Content> = serde_json::from_value(row.clone()).unwrap();

        assert_eq!(record.fields.status, ContentStatus::Pending);
        assert_eq!(record.fields.title, "Launch reel");
        assert_eq!(record.extra_field("updated_at"), Some(&json!("2025-03-02T08:30:00Z")));
        assert!(!record.extra.contains_key("title"));
    }

    #[test]
    fn test_label_or_unassigned() {
        let client = Record::new(
            Uuid::new_v4(),
            Utc::now(),
            Client {
                name: "Padaria Central".to_string(),
                company: None,
                email: None,
                phone: None,
                segment: None,
                status: ClientStatus::Active,
                notes: None,
            },
        );
        let records = vec![client.clone()];

        assert_eq!(label_or_unassigned(&records, Some(&client.id)), "Padaria Central");
        assert_eq!(label_or_unassigned(&records, Some(&Uuid::new_v4())), UNASSIGNED_LABEL);
        assert_eq!(label_or_unassigned(&records, None), UNASSIGNED_LABEL);
    }
}
