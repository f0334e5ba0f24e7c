//! # Agency Shared
//!
//! This crate defines the entity records and collection metadata shared across the
//! agency dashboard crates: the generic `Record<T>` envelope, one fields struct per
//! business entity and the static foreign-key table between collections.

pub mod types;

pub use types::{
    label_or_unassigned, Client, ClientStatus, Collection, Comment, Content, ContentStatus,
    Employee, Entity, ForeignKey, Idea, Mission, MissionStatus, OnDetach, Record, Suggestion,
    SuggestionStatus, Task, TaskStatus, UnknownCollection, UNASSIGNED_LABEL,
};
