//! Commands run end to end against an in-memory local backend.

use std::sync::Arc;

use agency_board::BoardError;
use agency_dashboard::{execute, BoardKind, Command, DashboardError, Dependencies};
use agency_repository::LocalCollectionBackend;
use agency_shared::{Client, Collection, Content, Task};

fn deps() -> Dependencies {
    Dependencies::with_backend(Arc::new(LocalCollectionBackend::in_memory()))
}

#[tokio::test]
async fn test_list_prints_newest_first() {
    let deps = deps();
    let clients = deps.store::<Client>();
    clients.create(Client::named("Older")).await.unwrap();
    clients.create(Client::named("Newer")).await.unwrap();

    let output = execute(Command::List { collection: Collection::Clients }, &deps)
        .await
        .unwrap();

    let newer = output.find("Newer").unwrap();
    let older = output.find("Older").unwrap();
    assert!(newer < older);
    assert!(output.ends_with("2 clients\n"));
}

#[tokio::test]
async fn test_move_then_board() {
    let deps = deps();
    let content = deps.store::<Content>().create(Content::draft("Launch reel")).await.unwrap();

    let moved = execute(
        Command::Move {
            board: BoardKind::Approvals,
            id: content.id,
            target: "pending".to_string(),
            column: false,
        },
        &deps,
    )
    .await
    .unwrap();
    assert!(moved.contains("Em Aprovação"));

    let board = execute(Command::Board { board: BoardKind::Approvals }, &deps)
        .await
        .unwrap();
    assert!(board.contains("Rascunho (0)"));
    assert!(board.contains("Em Aprovação (1)"));
    assert!(board.contains("Launch reel"));
}

#[tokio::test]
async fn test_move_to_same_column_reports_no_change() {
    let deps = deps();
    let task = deps.store::<Task>().create(Task::titled("Edit video")).await.unwrap();

    let output = execute(
        Command::Move {
            board: BoardKind::Tasks,
            id: task.id,
            target: "todo".to_string(),
            column: false,
        },
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(output, "Already in A Fazer\n");
}

#[tokio::test]
async fn test_delete_referenced_client_needs_detach() {
    let deps = deps();
    let client = deps.store::<Client>().create(Client::named("Acme")).await.unwrap();
    let mut task = Task::titled("Kickoff");
    task.client_id = Some(client.id);
    let task = deps.store::<Task>().create(task).await.unwrap();

    let rejected = execute(
        Command::Delete { collection: Collection::Clients, id: client.id, detach: false },
        &deps,
    )
    .await;
    match rejected {
        Err(DashboardError::StoreError(error)) => assert!(error.is_referential()),
        other => panic!("expected a referential error, got {other:?}"),
    }

    execute(
        Command::Delete { collection: Collection::Clients, id: client.id, detach: true },
        &deps,
    )
    .await
    .unwrap();

    let tasks = deps.store::<Task>().list().await;
    assert_eq!(tasks[0].id, task.id);
    assert_eq!(tasks[0].fields.client_id, None);
    assert!(deps.store::<Client>().list().await.is_empty());
}

#[tokio::test]
async fn test_move_by_column_id() {
    let deps = deps();
    let task = deps.store::<Task>().create(Task::titled("Edit video")).await.unwrap();
    let by_column = |target: &str| Command::Move {
        board: BoardKind::Tasks,
        id: task.id,
        target: target.to_string(),
        column: true,
    };

    let output = execute(by_column("done"), &deps).await.unwrap();
    assert_eq!(output, "Edit video is in Concluído\n");

    let card_as_column = execute(by_column(&task.id.to_string()), &deps).await;
    assert!(matches!(
        card_as_column,
        Err(DashboardError::BoardError(BoardError::UnknownColumn { .. }))
    ));

    let missing = Command::Move {
        board: BoardKind::Tasks,
        id: uuid::Uuid::new_v4(),
        target: "todo".to_string(),
        column: true,
    };
    assert!(matches!(
        execute(missing, &deps).await,
        Err(DashboardError::BoardError(BoardError::UnknownCard(_)))
    ));

    let listed = deps.store::<Task>().list().await;
    assert_eq!(listed[0].fields.status, agency_shared::TaskStatus::Done);
}
