//! Error types for the agency repository.
//!
//! `BackendError` is what a `CollectionBackend` reports; `StoreError` is what
//! `EntityStore` surfaces to callers, tagged with the collection and operation.

mod backend_error;
mod store_error;

pub use backend_error::BackendError;
pub use store_error::{ErrorKind, StoreError};
