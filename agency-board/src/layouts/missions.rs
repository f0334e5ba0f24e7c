use agency_shared::{Mission, MissionStatus};

use crate::layout::BoardLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionColumn {
    Available,
    InProgress,
    Completed,
}

const COLUMNS: [MissionColumn; 3] = [
    MissionColumn::Available,
    MissionColumn::InProgress,
    MissionColumn::Completed,
];

/// The missions board of the points system.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionBoard;

impl BoardLayout for MissionBoard {
    type Entity = Mission;
    type Status = MissionStatus;
    type Column = MissionColumn;

    const NAME: &'static str = "missions";

    fn columns() -> &'static [MissionColumn] {
        &COLUMNS
    }

    fn column_for(status: MissionStatus) -> MissionColumn {
        match status {
            MissionStatus::Available => MissionColumn::Available,
            MissionStatus::InProgress => MissionColumn::InProgress,
            MissionStatus::Completed => MissionColumn::Completed,
        }
    }

    fn status_for(column: MissionColumn) -> MissionStatus {
        match column {
            MissionColumn::Available => MissionStatus::Available,
            MissionColumn::InProgress => MissionStatus::InProgress,
            MissionColumn::Completed => MissionStatus::Completed,
        }
    }

    fn column_id(column: MissionColumn) -> &'static str {
        match column {
            MissionColumn::Available => "available",
            MissionColumn::InProgress => "in_progress",
            MissionColumn::Completed => "completed",
        }
    }

    fn column_label(column: MissionColumn) -> &'static str {
        match column {
            MissionColumn::Available => "Disponíveis",
            MissionColumn::InProgress => "Em Andamento",
            MissionColumn::Completed => "Concluídas",
        }
    }

    fn status_of(entity: &Mission) -> MissionStatus {
        entity.status
    }
}
