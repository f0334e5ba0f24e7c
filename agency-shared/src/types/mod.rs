//! This module defines the core data structures used across the dashboard.
//! It re-exports the collection metadata, the record envelope and every entity type.

mod client;
mod collection;
mod comment;
mod content;
mod employee;
mod idea;
mod mission;
mod record;
mod suggestion;
mod task;

pub use client::{Client, ClientStatus};
pub use collection::{Collection, ForeignKey, OnDetach, UnknownCollection};
pub use comment::Comment;
pub use content::{Content, ContentStatus};
pub use employee::Employee;
pub use idea::Idea;
pub use mission::{Mission, MissionStatus};
pub use record::{label_or_unassigned, Entity, Record, UNASSIGNED_LABEL};
pub use suggestion::{Suggestion, SuggestionStatus};
pub use task::{Task, TaskStatus};
