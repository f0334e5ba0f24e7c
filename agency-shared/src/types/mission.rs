use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::record::Entity;

/// Lifecycle of a gamified mission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Available,
    InProgress,
    Completed,
}

/// A mission that rewards the assignee with `points` when completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub status: MissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
}

impl Entity for Mission {
    const COLLECTION: Collection = Collection::Missions;

    fn label(&self) -> &str {
        &self.title
    }
}
