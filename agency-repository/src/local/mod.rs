//! Local implementation of the collection backend.
//!
//! Keeps every collection in memory and, when opened on a path, mirrors the
//! whole store to a single JSON document after each write. This is the
//! dashboard's equivalent of browser local storage: no server, one file.

mod collection_backend;

pub use collection_backend::LocalCollectionBackend;
