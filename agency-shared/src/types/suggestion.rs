use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::record::Entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    Open,
    Reviewed,
    Accepted,
    Declined,
}

/// User feedback about the dashboard itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub status: SuggestionStatus,
}

impl Entity for Suggestion {
    const COLLECTION: Collection = Collection::Suggestions;

    fn label(&self) -> &str {
        &self.title
    }
}
