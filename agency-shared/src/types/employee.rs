use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::record::Entity;

/// A member of the agency team. `points` accumulates mission rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub points: i64,
}

impl Employee {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            role: None,
            points: 0,
        }
    }
}

impl Entity for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn label(&self) -> &str {
        &self.name
    }
}
