//! Content pieces and their approval lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Collection;
use super::record::Entity;

/// Lifecycle of a piece of content, from first draft to publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Draft,
    Production,
    Pending,
    Approved,
    Revision,
    Rejected,
    Published,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 7] = [
        ContentStatus::Draft,
        ContentStatus::Production,
        ContentStatus::Pending,
        ContentStatus::Approved,
        ContentStatus::Revision,
        ContentStatus::Rejected,
        ContentStatus::Published,
    ];

    /// The wire value, as stored in the `status` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Production => "production",
            ContentStatus::Pending => "pending",
            ContentStatus::Approved => "approved",
            ContentStatus::Revision => "revision",
            ContentStatus::Rejected => "rejected",
            ContentStatus::Published => "published",
        }
    }
}

/// A piece of content on the editorial calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
}

impl Content {
    /// A new draft with only a title.
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: ContentStatus::Draft,
            client_id: None,
            responsible_id: None,
            platform: None,
            publish_date: None,
        }
    }
}

impl Entity for Content {
    const COLLECTION: Collection = Collection::Contents;

    fn label(&self) -> &str {
        &self.title
    }
}
