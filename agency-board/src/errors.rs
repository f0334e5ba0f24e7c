//! Error types for board operations.

use agency_repository::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors from explicit (non drag-and-drop) board moves.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    #[error("Unknown column {column:?} on the {board} board")]
    UnknownColumn { board: &'static str, column: String },

    #[error("Card {0} is not on the board")]
    UnknownCard(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}
