//! # Agency Repository
//!
//! This crate provides the data access layer of the agency dashboard. It includes
//! the `CollectionBackend` interface (the four row operations every collection
//! supports, plus a transactional detach-and-delete), a PostgreSQL implementation,
//! a local file-backed implementation, and `EntityStore`, the cached per-collection
//! store that presentation code talks to.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod local;
pub mod postgres;
pub mod service;
pub mod types;

pub use config::StoreConfig;
pub use errors::{BackendError, ErrorKind, StoreError};
pub use interfaces::CollectionBackend;
pub use local::LocalCollectionBackend;
pub use postgres::PostgresCollectionBackend;
pub use service::EntityStore;
pub use types::{LoadPhase, Operation, Row};
