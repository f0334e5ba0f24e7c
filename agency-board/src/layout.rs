//! The board layout trait.

use std::fmt::Debug;

use agency_shared::Entity;
use serde::Serialize;

/// A static status <-> column mapping for one board.
///
/// The forward mapping (`column_for`) is total: every status lands in exactly
/// one column. Several statuses may share a column, so the inverse
/// (`status_for`) names one canonical status per column. Implementations write
/// both directions as exhaustive `match`es so an unmapped variant does not
/// compile.
pub trait BoardLayout: Send + Sync + 'static {
    type Entity: Entity;
    type Status: Copy + Eq + Debug + Serialize + Send + Sync;
    type Column: Copy + Eq + Debug + Send + Sync + 'static;

    /// Board name, used in logs and errors.
    const NAME: &'static str;

    /// Columns in display order.
    fn columns() -> &'static [Self::Column];

    fn column_for(status: Self::Status) -> Self::Column;

    /// The canonical status persisted for cards dropped into `column`.
    fn status_for(column: Self::Column) -> Self::Status;

    /// Stable identifier the drag-and-drop layer uses for the column container.
    fn column_id(column: Self::Column) -> &'static str;

    /// Human label shown in the column header and in notifications.
    fn column_label(column: Self::Column) -> &'static str;

    fn status_of(entity: &Self::Entity) -> Self::Status;

    fn parse_column(id: &str) -> Option<Self::Column> {
        Self::columns()
            .iter()
            .copied()
            .find(|column| Self::column_id(*column) == id)
    }

    /// The column a card currently sits in.
    fn column_of(entity: &Self::Entity) -> Self::Column {
        Self::column_for(Self::status_of(entity))
    }
}
