//! Row and state types shared by the backends and the entity store.

use std::fmt;

/// A backend row: one JSON object keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Columns assigned by the backend at creation and never patched afterwards.
pub const IMMUTABLE_COLUMNS: [&str; 2] = ["id", "created_at"];

/// A write operation against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// Load state of an `EntityStore`.
///
/// `Uninitialized -> Loading -> Ready` on the first fetch, and
/// `Ready -> Loading -> Ready` on every refetch. A failed fetch still ends in
/// `Ready`; failures are reported through the store's error overlay instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}
