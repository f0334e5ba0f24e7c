use agency_shared::{Task, TaskStatus};

use crate::layout::BoardLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskColumn {
    Todo,
    InProgress,
    Review,
    Done,
}

const COLUMNS: [TaskColumn; 4] = [
    TaskColumn::Todo,
    TaskColumn::InProgress,
    TaskColumn::Review,
    TaskColumn::Done,
];

/// The task board. One column per task status.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskBoard;

impl BoardLayout for TaskBoard {
    type Entity = Task;
    type Status = TaskStatus;
    type Column = TaskColumn;

    const NAME: &'static str = "tasks";

    fn columns() -> &'static [TaskColumn] {
        &COLUMNS
    }

    fn column_for(status: TaskStatus) -> TaskColumn {
        match status {
            TaskStatus::Todo => TaskColumn::Todo,
            TaskStatus::InProgress => TaskColumn::InProgress,
            TaskStatus::Review => TaskColumn::Review,
            TaskStatus::Done => TaskColumn::Done,
        }
    }

    fn status_for(column: TaskColumn) -> TaskStatus {
        match column {
            TaskColumn::Todo => TaskStatus::Todo,
            TaskColumn::InProgress => TaskStatus::InProgress,
            TaskColumn::Review => TaskStatus::Review,
            TaskColumn::Done => TaskStatus::Done,
        }
    }

    fn column_id(column: TaskColumn) -> &'static str {
        match column {
            TaskColumn::Todo => "todo",
            TaskColumn::InProgress => "in_progress",
            TaskColumn::Review => "review",
            TaskColumn::Done => "done",
        }
    }

    fn column_label(column: TaskColumn) -> &'static str {
        match column {
            TaskColumn::Todo => "A Fazer",
            TaskColumn::InProgress => "Em Andamento",
            TaskColumn::Review => "Em Revisão",
            TaskColumn::Done => "Concluído",
        }
    }

    fn status_of(entity: &Task) -> TaskStatus {
        entity.status
    }
}
