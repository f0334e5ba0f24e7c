//! Interface definitions for collection backends.
//!
//! This module defines the abstract `CollectionBackend` trait that allows for
//! dependency injection and swappable storage implementations.

mod collection_backend;

pub use collection_backend::CollectionBackend;
