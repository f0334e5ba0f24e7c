//! The content approvals board.
//!
//! Seven content statuses collapse into five columns: `rejected` cards sit with
//! the ones needing revision, and `published` cards sit with the approved ones.
//! Dropping a card into either of those columns persists the column's
//! canonical status (`revision`, `approved`).

use agency_shared::{Content, ContentStatus};

use crate::layout::BoardLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalColumn {
    Draft,
    Production,
    Pending,
    Revision,
    Approved,
}

const COLUMNS: [ApprovalColumn; 5] = [
    ApprovalColumn::Draft,
    ApprovalColumn::Production,
    ApprovalColumn::Pending,
    ApprovalColumn::Revision,
    ApprovalColumn::Approved,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalBoard;

impl BoardLayout for ApprovalBoard {
    type Entity = Content;
    type Status = ContentStatus;
    type Column = ApprovalColumn;

    const NAME: &'static str = "approvals";

    fn columns() -> &'static [ApprovalColumn] {
        &COLUMNS
    }

    fn column_for(status: ContentStatus) -> ApprovalColumn {
        match status {
            ContentStatus::Draft => ApprovalColumn::Draft,
            ContentStatus::Production => ApprovalColumn::Production,
            ContentStatus::Pending => ApprovalColumn::Pending,
            ContentStatus::Revision | ContentStatus::Rejected => ApprovalColumn::Revision,
            ContentStatus::Approved | ContentStatus::Published => ApprovalColumn::Approved,
        }
    }

    fn status_for(column: ApprovalColumn) -> ContentStatus {
        match column {
            ApprovalColumn::Draft => ContentStatus::Draft,
            ApprovalColumn::Production => ContentStatus::Production,
            ApprovalColumn::Pending => ContentStatus::Pending,
            ApprovalColumn::Revision => ContentStatus::Revision,
            ApprovalColumn::Approved => ContentStatus::Approved,
        }
    }

    fn column_id(column: ApprovalColumn) -> &'static str {
        match column {
            ApprovalColumn::Draft => "draft",
            ApprovalColumn::Production => "production",
            ApprovalColumn::Pending => "pending",
            ApprovalColumn::Revision => "revision",
            ApprovalColumn::Approved => "approved",
        }
    }

    fn column_label(column: ApprovalColumn) -> &'static str {
        match column {
            ApprovalColumn::Draft => "Rascunho",
            ApprovalColumn::Production => "Em Produção",
            ApprovalColumn::Pending => "Em Aprovação",
            ApprovalColumn::Revision => "Ajustes",
            ApprovalColumn::Approved => "Aprovado",
        }
    }

    fn status_of(entity: &Content) -> ContentStatus {
        entity.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_is_column_stable() {
        for status in ContentStatus::ALL {
            let column = ApprovalBoard::column_for(status);
            let canonical = ApprovalBoard::status_for(column);
            assert_eq!(ApprovalBoard::column_for(canonical), column, "{status:?}");
        }
    }

    #[test]
    fn test_collapsed_statuses() {
        assert_eq!(
            ApprovalBoard::status_for(ApprovalBoard::column_for(ContentStatus::Published)),
            ContentStatus::Approved
        );
        assert_eq!(
            ApprovalBoard::status_for(ApprovalBoard::column_for(ContentStatus::Rejected)),
            ContentStatus::Revision
        );
    }

    #[test]
    fn test_every_column_round_trips_through_its_id() {
        for column in ApprovalBoard::columns() {
            let id = ApprovalBoard::column_id(*column);
            assert_eq!(ApprovalBoard::parse_column(id), Some(*column));
            assert_eq!(ApprovalBoard::column_for(ApprovalBoard::status_for(*column)), *column);
        }
        assert_eq!(ApprovalBoard::parse_column("published"), None);
    }
}
