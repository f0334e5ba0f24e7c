//! PostgreSQL implementation of the collection backend.
//!
//! Each `Collection` maps to one table. Rows travel as JSON documents: reads use
//! `to_jsonb(t.*)` and writes project the submitted document through
//! `jsonb_populate_record`, so column defaults and triggers apply and the row
//! handed back is always the one the database stored.
//!
//! ## Database Tables
//!
//! Created by the migrations in `src/postgres/migrations`: `clients`,
//! `employees`, `contents`, `tasks`, `ideas`, `comments`, `missions` and
//! `suggestions`, with the foreign keys declared in `agency_shared`.

mod collection_backend;
mod sql;

pub use collection_backend::PostgresCollectionBackend;
