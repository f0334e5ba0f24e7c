//! Drop-target resolution.

use agency_shared::Record;
use uuid::Uuid;

use crate::layout::BoardLayout;

/// What a raw drag-and-drop target id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget<C> {
    /// A column container.
    Column(C),
    /// Another card, meaning "dropped onto this card".
    Card(Uuid),
}

impl<C: Copy> DropTarget<C> {
    /// Interprets the raw id reported by the drag library for board `L`.
    ///
    /// Column ids take precedence over card ids. Returns `None` for ids that
    /// are neither.
    pub fn parse<L>(raw: &str) -> Option<Self>
    where
        L: BoardLayout<Column = C>,
    {
        if let Some(column) = L::parse_column(raw) {
            return Some(DropTarget::Column(column));
        }
        Uuid::parse_str(raw).ok().map(DropTarget::Card)
    }
}

/// Resolves the column a drop landed in, first match wins:
///
/// 1. `over` is a known column id: that column.
/// 2. `over` is the id of a card in `cards`: the column that card sits in.
/// 3. Anything else, including no target at all: `None`, the drag is cancelled.
pub fn resolve_target_column<L: BoardLayout>(
    over: Option<&str>,
    cards: &[Record<L::Entity>],
) -> Option<L::Column> {
    match DropTarget::parse::<L>(over?)? {
        DropTarget::Column(column) => Some(column),
        DropTarget::Card(id) => cards
            .iter()
            .find(|card| card.id == id)
            .map(|card| L::column_of(&card.fields)),
    }
}
