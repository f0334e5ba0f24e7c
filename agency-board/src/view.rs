//! Column views for re-rendering a board from the store's records.

use agency_shared::Record;

use crate::layout::BoardLayout;

/// One column of a rendered board.
#[derive(Debug, Clone)]
pub struct ColumnView<L: BoardLayout> {
    pub column: L::Column,
    pub id: &'static str,
    pub label: &'static str,
    pub cards: Vec<Record<L::Entity>>,
}

/// Groups `records` into the board's columns, in display order.
///
/// Cards keep the relative order of `records` (newest first when they come
/// from a store). Every column is present, empty ones included.
pub fn board_view<L: BoardLayout>(records: &[Record<L::Entity>]) -> Vec<ColumnView<L>> {
    L::columns()
        .iter()
        .map(|&column| ColumnView {
            column,
            id: L::column_id(column),
            label: L::column_label(column),
            cards: records
                .iter()
                .filter(|record| L::column_of(&record.fields) == column)
                .cloned()
                .collect(),
        })
        .collect()
}
