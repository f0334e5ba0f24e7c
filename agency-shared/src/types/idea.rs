use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::record::Entity;

/// A content idea captured before it becomes a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
}

impl Entity for Idea {
    const COLLECTION: Collection = Collection::Ideas;

    fn label(&self) -> &str {
        &self.title
    }
}
