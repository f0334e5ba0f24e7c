//! Drag-and-drop reconciliation.
//!
//! `BoardReconciler` turns one drop gesture into at most one status write
//! through the board's `EntityStore`. It never rolls the board back itself:
//! after a failed write the store's records are still the source of truth and
//! the board is re-rendered from them.

use std::fmt;
use std::sync::Arc;

use agency_repository::{EntityStore, StoreError};
use agency_shared::Record;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::BoardError;
use crate::layout::BoardLayout;
use crate::target::resolve_target_column;
use crate::view::{board_view, ColumnView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn moved_to(label: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: format!("Moved to {label}"),
        }
    }

    pub fn move_failed(label: &str, error: &StoreError) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: format!("Could not move card to {label}: {error}"),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a drop resolved to.
#[derive(Debug, Clone)]
pub enum DropOutcome<E, C> {
    /// No target, an unknown target, or an unknown dragged card. Nothing was written.
    Cancelled,
    /// The card already sits in the target column. Nothing was written.
    Unchanged { column: C },
    /// The status change was persisted; `record` is the backend's copy.
    Moved {
        record: Record<E>,
        column: C,
        notification: Notification,
    },
    /// The backend rejected the status change.
    Failed {
        column: C,
        error: StoreError,
        notification: Notification,
    },
}

impl<E, C> DropOutcome<E, C> {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            DropOutcome::Moved { notification, .. } | DropOutcome::Failed { notification, .. } => {
                Some(notification)
            }
            DropOutcome::Cancelled | DropOutcome::Unchanged { .. } => None,
        }
    }

    pub fn wrote(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. } | DropOutcome::Failed { .. })
    }
}

pub type BoardOutcome<L> = DropOutcome<<L as BoardLayout>::Entity, <L as BoardLayout>::Column>;

#[derive(Serialize)]
struct StatusChange<S> {
    status: S,
}

/// Applies drops on board `L` to its entity store.
pub struct BoardReconciler<L: BoardLayout> {
    store: Arc<EntityStore<L::Entity>>,
}

impl<L: BoardLayout> BoardReconciler<L> {
    pub fn new(store: Arc<EntityStore<L::Entity>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<EntityStore<L::Entity>> {
        &self.store
    }

    /// Handles a drop of `dragged_id` over the raw target id `over`.
    ///
    /// # Arguments
    ///
    /// * `dragged_id` - The card being dragged
    /// * `over` - The raw id under the pointer: a column id, another card's id,
    ///   or `None` when the drag was cancelled
    ///
    /// Resolves the target column against the store's cached records and
    /// writes `{ "status": <canonical status> }` when the card changes column.
    #[instrument(skip(self, dragged_id), fields(board = L::NAME, id = %dragged_id))]
    pub async fn handle_drop(&self, dragged_id: Uuid, over: Option<&str>) -> BoardOutcome<L> {
        let cards = self.store.records().await;

        let Some(target) = resolve_target_column::<L>(over, &cards) else {
            debug!(?over, "Drop target did not resolve, ignoring");
            return DropOutcome::Cancelled;
        };
        let Some(dragged) = cards.iter().find(|card| card.id == dragged_id) else {
            warn!("Dragged card is not on the board, ignoring");
            return DropOutcome::Cancelled;
        };

        if L::column_of(&dragged.fields) == target {
            debug!(column = L::column_id(target), "Card dropped on its own column");
            return DropOutcome::Unchanged { column: target };
        }

        let label = L::column_label(target);
        let change = StatusChange {
            status: L::status_for(target),
        };
        match self.store.update(dragged_id, &change).await {
            Ok(record) => {
                info!(column = L::column_id(target), "Card moved");
                DropOutcome::Moved {
                    record,
                    column: target,
                    notification: Notification::moved_to(label),
                }
            }
            Err(error) => {
                warn!(column = L::column_id(target), error = %error, "Card move failed");
                let notification = Notification::move_failed(label, &error);
                DropOutcome::Failed {
                    column: target,
                    error,
                    notification,
                }
            }
        }
    }

    /// Moves a card to the column with id `column_id` outside a drag gesture.
    ///
    /// Returns the cached record unchanged when it already sits in that column.
    pub async fn move_card(&self, id: Uuid, column_id: &str) -> Result<Record<L::Entity>, BoardError> {
        let column = L::parse_column(column_id).ok_or_else(|| BoardError::UnknownColumn {
            board: L::NAME,
            column: column_id.to_string(),
        })?;
        let card = self.store.get(id).await.ok_or(BoardError::UnknownCard(id))?;
        if L::column_of(&card.fields) == column {
            return Ok(card);
        }

        let change = StatusChange {
            status: L::status_for(column),
        };
        Ok(self.store.update(id, &change).await?)
    }

    /// The board as currently cached.
    pub async fn view(&self) -> Vec<ColumnView<L>> {
        board_view::<L>(&self.store.records().await)
    }

    /// Refetches the collection and returns the re-rendered board.
    pub async fn refresh(&self) -> Vec<ColumnView<L>> {
        board_view::<L>(&self.store.list().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_change_serialises_wire_value() {
        let change = StatusChange {
            status: agency_shared::ContentStatus::Pending,
        };
        assert_eq!(
            serde_json::to_value(&change).ok(),
            Some(serde_json::json!({ "status": "pending" }))
        );
    }

    #[test]
    fn test_notifications_name_the_column() {
        let moved = Notification::moved_to("Em Aprovação");
        assert_eq!(moved.level, NotificationLevel::Success);
        assert!(moved.message.contains("Em Aprovação"));
    }
}
