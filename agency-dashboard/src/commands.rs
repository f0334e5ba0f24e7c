//! Command execution.
//!
//! Every command builds fresh stores over the shared backend, so each one
//! starts from a full fetch.

use std::fmt::Write;
use std::sync::Arc;

use agency_board::{
    ApprovalBoard, BoardLayout, BoardReconciler, ColumnView, DropOutcome, MissionBoard, TaskBoard,
};
use agency_shared::{
    Client, Collection, Comment, Content, Employee, Entity, Idea, Mission, Suggestion, Task,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cli::{BoardKind, Command};
use crate::config::Dependencies;
use crate::DashboardError;

/// Calls a generic function with the entity type stored in `$collection`.
macro_rules! with_entity {
    ($collection:expr, $func:ident($($arg:expr),*)) => {
        match $collection {
            Collection::Clients => $func::<Client>($($arg),*).await,
            Collection::Employees => $func::<Employee>($($arg),*).await,
            Collection::Tasks => $func::<Task>($($arg),*).await,
            Collection::Ideas => $func::<Idea>($($arg),*).await,
            Collection::Contents => $func::<Content>($($arg),*).await,
            Collection::Comments => $func::<Comment>($($arg),*).await,
            Collection::Missions => $func::<Mission>($($arg),*).await,
            Collection::Suggestions => $func::<Suggestion>($($arg),*).await,
        }
    };
}

/// Runs `command` and returns the text to print.
#[instrument(skip(deps))]
pub async fn execute(command: Command, deps: &Dependencies) -> Result<String, DashboardError> {
    match command {
        Command::List { collection } => with_entity!(collection, list_records(deps)),
        Command::Board { board } => match board {
            BoardKind::Approvals => show_board::<ApprovalBoard>(deps).await,
            BoardKind::Tasks => show_board::<TaskBoard>(deps).await,
            BoardKind::Missions => show_board::<MissionBoard>(deps).await,
        },
        Command::Move { board, id, target, column: true } => match board {
            BoardKind::Approvals => move_to_column::<ApprovalBoard>(deps, id, &target).await,
            BoardKind::Tasks => move_to_column::<TaskBoard>(deps, id, &target).await,
            BoardKind::Missions => move_to_column::<MissionBoard>(deps, id, &target).await,
        },
        Command::Move { board, id, target, column: false } => match board {
            BoardKind::Approvals => drop_card::<ApprovalBoard>(deps, id, &target).await,
            BoardKind::Tasks => drop_card::<TaskBoard>(deps, id, &target).await,
            BoardKind::Missions => drop_card::<MissionBoard>(deps, id, &target).await,
        },
        Command::Delete { collection, id, detach } => {
            with_entity!(collection, delete_record(deps, id, detach))
        }
    }
}

async fn list_records<T: Entity>(deps: &Dependencies) -> Result<String, DashboardError> {
    let store = deps.store::<T>();
    let records = store.list().await;
    if let Some(error) = store.last_error().await {
        return Err(error.into());
    }

    let mut out = String::new();
    for record in &records {
        let _ = writeln!(out, "{}  {}  {}", record.id, record.created_at.to_rfc3339(), record.label());
    }
    let _ = writeln!(out, "{} {}", records.len(), T::COLLECTION);
    Ok(out)
}

async fn delete_record<T: Entity>(
    deps: &Dependencies,
    id: Uuid,
    detach: bool,
) -> Result<String, DashboardError> {
    let store = deps.store::<T>();
    if detach {
        store.remove_detaching(id).await?;
    } else {
        store.remove(id).await?;
    }
    info!(collection = %T::COLLECTION, id = %id, detach, "Record deleted");
    Ok(format!("Deleted {id} from {}\n", T::COLLECTION))
}

fn reconciler<L: BoardLayout>(deps: &Dependencies) -> BoardReconciler<L> {
    BoardReconciler::new(Arc::new(deps.store::<L::Entity>()))
}

async fn show_board<L: BoardLayout>(deps: &Dependencies) -> Result<String, DashboardError> {
    let board = reconciler::<L>(deps);
    let view = board.refresh().await;
    if let Some(error) = board.store().last_error().await {
        return Err(error.into());
    }
    Ok(render_board(&view))
}

/// Moves a card as a drop over `target`, which may be a column or another card.
async fn drop_card<L: BoardLayout>(
    deps: &Dependencies,
    id: Uuid,
    target: &str,
) -> Result<String, DashboardError> {
    let board = reconciler::<L>(deps);
    board.refresh().await;
    if let Some(error) = board.store().last_error().await {
        return Err(error.into());
    }

    match board.handle_drop(id, Some(target)).await {
        DropOutcome::Moved { notification, .. } => Ok(format!("{notification}\n")),
        DropOutcome::Unchanged { column } => Ok(format!("Already in {}\n", L::column_label(column))),
        DropOutcome::Cancelled => Ok(format!(
            "Nothing moved: {target} is not a column or card on the {} board, or {id} is not on it\n",
            L::NAME
        )),
        DropOutcome::Failed { error, .. } => Err(error.into()),
    }
}

/// Moves a card to the column with id `column_id`.
async fn move_to_column<L: BoardLayout>(
    deps: &Dependencies,
    id: Uuid,
    column_id: &str,
) -> Result<String, DashboardError> {
    let board = reconciler::<L>(deps);
    board.refresh().await;
    if let Some(error) = board.store().last_error().await {
        return Err(error.into());
    }

    let record = board.move_card(id, column_id).await?;
    Ok(format!(
        "{} is in {}\n",
        record.label(),
        L::column_label(L::column_of(&record.fields))
    ))
}

/// Renders each column as a header followed by its cards.
pub fn render_board<L: BoardLayout>(view: &[ColumnView<L>]) -> String {
    let mut out = String::new();
    for column in view {
        let _ = writeln!(out, "{} ({})", column.label, column.cards.len());
        for card in &column.cards {
            let _ = writeln!(out, "  {}  {}", card.id, card.label());
        }
    }
    out
}
