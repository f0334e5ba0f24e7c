//! Command-line interface.

use agency_shared::Collection;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Agency dashboard command-line client
#[derive(Debug, Parser)]
#[command(name = "agency-dashboard", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the records of a collection, newest first
    List {
        /// Collection name (clients, employees, tasks, ideas, contents, comments, missions, suggestions)
        collection: Collection,
    },

    /// Show a Kanban board
    Board {
        #[arg(value_enum)]
        board: BoardKind,
    },

    /// Move a card as if it was dropped over a column or another card
    Move {
        #[arg(value_enum)]
        board: BoardKind,
        /// Card to move
        id: Uuid,
        /// Column id, or the id of a card already in the destination column
        target: String,
        /// Treat the target strictly as a column id and fail if it is not one
        #[arg(long)]
        column: bool,
    },

    /// Delete a record
    Delete {
        collection: Collection,
        id: Uuid,
        /// Detach every record referencing it first, in the same transaction
        #[arg(long)]
        detach: bool,
    },
}

/// Boards available to `board` and `move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoardKind {
    Approvals,
    Tasks,
    Missions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from(["agency-dashboard", "move", "approvals", &id.to_string(), "pending"])
            .unwrap();

        match cli.command {
            Command::Move { board, id: parsed, target, column } => {
                assert_eq!(board, BoardKind::Approvals);
                assert_eq!(parsed, id);
                assert_eq!(target, "pending");
                assert!(!column);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_move_by_column() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "agency-dashboard",
            "move",
            "tasks",
            &id.to_string(),
            "done",
            "--column",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Move { board: BoardKind::Tasks, column: true, .. }
        ));
    }

    #[test]
    fn test_parse_delete_with_detach() {
        let id = Uuid::new_v4();
        let cli =
            Cli::try_parse_from(["agency-dashboard", "delete", "clients", &id.to_string(), "--detach"])
                .unwrap();

        assert!(matches!(
            cli.command,
            Command::Delete { collection: Collection::Clients, detach: true, .. }
        ));
    }

    #[test]
    fn test_rejects_unknown_collection() {
        assert!(Cli::try_parse_from(["agency-dashboard", "list", "posts"]).is_err());
    }
}
