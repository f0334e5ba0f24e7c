use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::record::Entity;

/// Feedback left on a piece of content during approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub content_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    pub body: String,
}

impl Entity for Comment {
    const COLLECTION: Collection = Collection::Comments;

    fn label(&self) -> &str {
        &self.body
    }
}
