//! Collection metadata.
//!
//! Every backend-side table the dashboard talks to is named by a `Collection`
//! variant instead of a free-form string, and the loose references between
//! collections are declared once in a static foreign-key table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::record::{Entity, Record};
use super::{Client, Comment, Content, Employee, Idea, Mission, Suggestion, Task};

/// A named backend-side grouping of entities of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Clients,
    Employees,
    Tasks,
    Ideas,
    Contents,
    Comments,
    Missions,
    Suggestions,
}

/// What happens to a referencing row when its target is deleted through
/// a detach-and-delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDetach {
    /// The referencing column is set to `NULL`.
    Nullify,
    /// The referencing row is deleted together with its target.
    Delete,
}

/// A loose reference from `collection.column` to the `id` of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub collection: Collection,
    pub column: &'static str,
    pub target: Collection,
    pub on_detach: OnDetach,
}

const fn fk(
    collection: Collection,
    column: &'static str,
    target: Collection,
    on_detach: OnDetach,
) -> ForeignKey {
    ForeignKey {
        collection,
        column,
        target,
        on_detach,
    }
}

static FOREIGN_KEYS: &[ForeignKey] = &[
    fk(Collection::Tasks, "client_id", Collection::Clients, OnDetach::Nullify),
    fk(Collection::Tasks, "responsible_id", Collection::Employees, OnDetach::Nullify),
    fk(Collection::Ideas, "client_id", Collection::Clients, OnDetach::Nullify),
    fk(Collection::Ideas, "author_id", Collection::Employees, OnDetach::Nullify),
    fk(Collection::Contents, "client_id", Collection::Clients, OnDetach::Nullify),
    fk(Collection::Contents, "responsible_id", Collection::Employees, OnDetach::Nullify),
    fk(Collection::Comments, "content_id", Collection::Contents, OnDetach::Delete),
    fk(Collection::Comments, "author_id", Collection::Employees, OnDetach::Nullify),
    fk(Collection::Missions, "assignee_id", Collection::Employees, OnDetach::Nullify),
    fk(Collection::Suggestions, "author_id", Collection::Employees, OnDetach::Nullify),
];

impl Collection {
    /// All collections, in dependency order (referenced collections first).
    pub const ALL: [Collection; 8] = [
        Collection::Clients,
        Collection::Employees,
        Collection::Contents,
        Collection::Tasks,
        Collection::Ideas,
        Collection::Comments,
        Collection::Missions,
        Collection::Suggestions,
    ];

    /// The backend table name for this collection.
    pub const fn table_name(self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Employees => "employees",
            Collection::Tasks => "tasks",
            Collection::Ideas => "ideas",
            Collection::Contents => "contents",
            Collection::Comments => "comments",
            Collection::Missions => "missions",
            Collection::Suggestions => "suggestions",
        }
    }

    /// Every declared foreign key, across all collections.
    pub fn foreign_keys() -> &'static [ForeignKey] {
        FOREIGN_KEYS
    }

    /// Checks that `row` decodes as a record of this collection's entity type.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the row has an id, a creation timestamp and valid fields
    /// * `Err(serde_json::Error)` - The first missing column or invalid value
    pub fn validate_row(
        self,
        row: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), serde_json::Error> {
        fn decode<T: Entity>(
            row: &serde_json::Map<String, serde_json::Value>,
        ) -> Result<(), serde_json::Error> {
            serde_json::from_value::<Record<T>>(serde_json::Value::Object(row.clone())).map(drop)
        }

        match self {
            Collection::Clients => decode::<Client>(row),
            Collection::Employees => decode::<Employee>(row),
            Collection::Tasks => decode::<Task>(row),
            Collection::Ideas => decode::<Idea>(row),
            Collection::Contents => decode::<Content>(row),
            Collection::Comments => decode::<Comment>(row),
            Collection::Missions => decode::<Mission>(row),
            Collection::Suggestions => decode::<Suggestion>(row),
        }
    }

    /// Foreign keys in other collections that point at this one.
    pub fn referenced_by(self) -> impl Iterator<Item = &'static ForeignKey> {
        FOREIGN_KEYS.iter().filter(move |key| key.target == self)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Error returned when a string does not name a known collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection: {}", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.table_name() == s.trim().to_lowercase())
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
