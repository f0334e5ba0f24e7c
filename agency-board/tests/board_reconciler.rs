//! Drag-and-drop scenarios against a local backend that records every write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agency_board::{
    ApprovalBoard, ApprovalColumn, BoardError, BoardReconciler, DropOutcome, NotificationLevel,
    TaskBoard, TaskColumn,
};
use agency_repository::{
    BackendError, CollectionBackend, EntityStore, LocalCollectionBackend, Row,
};
use agency_shared::{Collection, Content, ContentStatus, Task, TaskStatus};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Local backend wrapper that records update patches and can be told to fail them.
struct RecordingBackend {
    inner: LocalCollectionBackend,
    updates: Mutex<Vec<(Uuid, Row)>>,
    fail_updates: AtomicBool,
}

impl RecordingBackend {
    fn new() -> Self {
        Self {
            inner: LocalCollectionBackend::in_memory(),
            updates: Mutex::new(Vec::new()),
            fail_updates: AtomicBool::new(false),
        }
    }

    async fn updates(&self) -> Vec<(Uuid, Row)> {
        self.updates.lock().await.clone()
    }
}

#[async_trait]
impl CollectionBackend for RecordingBackend {
    async fn select_all(&self, collection: Collection) -> Result<Vec<Row>, BackendError> {
        self.inner.select_all(collection).await
    }

    async fn insert(&self, collection: Collection, fields: &Row) -> Result<Row, BackendError> {
        self.inner.insert(collection, fields).await
    }

    async fn update(&self, collection: Collection, id: Uuid, patch: &Row) -> Result<Row, BackendError> {
        self.updates.lock().await.push((id, patch.clone()));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(BackendError::connection("network unreachable"));
        }
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        self.inner.delete(collection, id).await
    }

    async fn detach_and_delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        self.inner.detach_and_delete(collection, id).await
    }
}

fn approvals(backend: &Arc<RecordingBackend>) -> BoardReconciler<ApprovalBoard> {
    let store: EntityStore<Content> = EntityStore::new(backend.clone());
    BoardReconciler::new(Arc::new(store))
}

fn tasks(backend: &Arc<RecordingBackend>) -> BoardReconciler<TaskBoard> {
    let store: EntityStore<Task> = EntityStore::new(backend.clone());
    BoardReconciler::new(Arc::new(store))
}

fn with_status(title: &str, status: ContentStatus) -> Content {
    let mut content = Content::draft(title);
    content.status = status;
    content
}

#[tokio::test]
async fn test_draft_dropped_on_pending_column() {
    let backend = Arc::new(RecordingBackend::new());
    let board = approvals(&backend);
    let card = board.store().create(Content::draft("Launch reel")).await.unwrap();

    let outcome = board.handle_drop(card.id, Some("pending")).await;

    let (record, column, notification) = match outcome {
        DropOutcome::Moved { record, column, notification } => (record, column, notification),
        other => panic!("expected a move, got {other:?}"),
    };
    assert_eq!(column, ApprovalColumn::Pending);
    assert_eq!(record.fields.status, ContentStatus::Pending);
    assert_eq!(notification.level, NotificationLevel::Success);
    assert!(notification.message.contains("Em Aprovação"));

    let updates = backend.updates().await;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, card.id);
    assert_eq!(serde_json::Value::Object(updates[0].1.clone()), json!({ "status": "pending" }));

    let view = board.view().await;
    let pending = view.iter().find(|c| c.label == "Em Aprovação").unwrap();
    assert_eq!(pending.cards.len(), 1);
    assert_eq!(pending.cards[0].id, card.id);
    assert!(view.iter().find(|c| c.id == "draft").unwrap().cards.is_empty());
}

#[tokio::test]
async fn test_drop_on_own_column_does_not_write() {
    let backend = Arc::new(RecordingBackend::new());
    let board = tasks(&backend);
    let card = board.store().create(Task::titled("Edit video")).await.unwrap();

    let on_column = board.handle_drop(card.id, Some("todo")).await;
    let on_itself = board.handle_drop(card.id, Some(&card.id.to_string())).await;

    assert!(matches!(on_column, DropOutcome::Unchanged { column: TaskColumn::Todo }));
    assert!(matches!(on_itself, DropOutcome::Unchanged { column: TaskColumn::Todo }));
    assert!(on_column.notification().is_none());
    assert!(backend.updates().await.is_empty());
}

#[tokio::test]
async fn test_published_card_in_approved_column_is_left_alone() {
    let backend = Arc::new(RecordingBackend::new());
    let board = approvals(&backend);
    let card = board
        .store()
        .create(with_status("Live post", ContentStatus::Published))
        .await
        .unwrap();

    let outcome = board.handle_drop(card.id, Some("approved")).await;

    assert!(!outcome.wrote());
    assert!(backend.updates().await.is_empty());
    let cached = board.store().get(card.id).await.unwrap();
    assert_eq!(cached.fields.status, ContentStatus::Published);
}

#[tokio::test]
async fn test_drop_on_card_matches_drop_on_its_column() {
    let backend = Arc::new(RecordingBackend::new());
    let board = tasks(&backend);
    let mut reviewed = Task::titled("Proofread");
    reviewed.status = TaskStatus::Review;
    let anchor = board.store().create(reviewed).await.unwrap();
    let first = board.store().create(Task::titled("Caption")).await.unwrap();
    let second = board.store().create(Task::titled("Thumbnail")).await.unwrap();

    let via_card = board.handle_drop(first.id, Some(&anchor.id.to_string())).await;
    let via_column = board.handle_drop(second.id, Some("review")).await;

    let statuses: Vec<_> = [via_card, via_column]
        .into_iter()
        .map(|outcome| match outcome {
            DropOutcome::Moved { record, .. } => record.fields.status,
            other => panic!("expected a move, got {other:?}"),
        })
        .collect();
    assert_eq!(statuses, vec![TaskStatus::Review, TaskStatus::Review]);

    let updates = backend.updates().await;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].1, updates[1].1);
}

#[tokio::test]
async fn test_unresolved_drops_are_cancelled() {
    let backend = Arc::new(RecordingBackend::new());
    let board = approvals(&backend);
    let card = board.store().create(Content::draft("Story")).await.unwrap();

    let cancelled = board.handle_drop(card.id, None).await;
    let off_board = board.handle_drop(card.id, Some("trash")).await;
    let stranger = board.handle_drop(card.id, Some(&Uuid::new_v4().to_string())).await;
    let unknown_card = board.handle_drop(Uuid::new_v4(), Some("pending")).await;

    for outcome in [cancelled, off_board, stranger, unknown_card] {
        assert!(matches!(outcome, DropOutcome::Cancelled), "{outcome:?}");
    }
    assert!(backend.updates().await.is_empty());
}

#[tokio::test]
async fn test_failed_move_notifies_and_keeps_store_state() {
    let backend = Arc::new(RecordingBackend::new());
    let board = approvals(&backend);
    let card = board.store().create(Content::draft("Carousel")).await.unwrap();
    backend.fail_updates.store(true, Ordering::SeqCst);

    let outcome = board.handle_drop(card.id, Some("revision")).await;

    let (column, error, notification) = match outcome {
        DropOutcome::Failed { column, error, notification } => (column, error, notification),
        other => panic!("expected a failure, got {other:?}"),
    };
    assert_eq!(column, ApprovalColumn::Revision);
    assert!(error.is_persistence());
    assert_eq!(notification.level, NotificationLevel::Error);
    assert!(notification.message.contains("Ajustes"));

    let view = board.view().await;
    assert_eq!(view[0].id, "draft");
    assert_eq!(view[0].cards.len(), 1);
    assert!(board.store().last_error().await.is_some());
}

#[tokio::test]
async fn test_rapid_drops_leave_last_column() {
    let backend = Arc::new(RecordingBackend::new());
    let board = tasks(&backend);
    let card = board.store().create(Task::titled("Schedule posts")).await.unwrap();

    for target in ["in_progress", "review", "done"] {
        board.handle_drop(card.id, Some(target)).await;
    }

    let done = board.store().get(card.id).await.unwrap();
    assert_eq!(done.fields.status, TaskStatus::Done);
    assert_eq!(backend.updates().await.len(), 3);
}

#[tokio::test]
async fn test_move_card_by_column_id() {
    let backend = Arc::new(RecordingBackend::new());
    let board = approvals(&backend);
    let card = board
        .store()
        .create(with_status("Reel", ContentStatus::Rejected))
        .await
        .unwrap();

    let unchanged = board.move_card(card.id, "revision").await.unwrap();
    assert_eq!(unchanged.fields.status, ContentStatus::Rejected);
    assert!(backend.updates().await.is_empty());

    let moved = board.move_card(card.id, "production").await.unwrap();
    assert_eq!(moved.fields.status, ContentStatus::Production);

    assert!(matches!(
        board.move_card(card.id, "archive").await,
        Err(BoardError::UnknownColumn { .. })
    ));
    assert!(matches!(
        board.move_card(Uuid::new_v4(), "draft").await,
        Err(BoardError::UnknownCard(_))
    ));
}

#[tokio::test]
async fn test_refresh_rebuilds_board_from_backend() {
    let backend = Arc::new(RecordingBackend::new());
    let writer = approvals(&backend);
    let reader = approvals(&backend);
    writer.store().create(Content::draft("One")).await.unwrap();
    writer
        .store()
        .create(with_status("Two", ContentStatus::Approved))
        .await
        .unwrap();

    assert!(reader.view().await.iter().all(|c| c.cards.is_empty()));

    let view = reader.refresh().await;
    assert_eq!(view[0].cards.len(), 1);
    assert_eq!(view[4].cards[0].label(), "Two");
}
