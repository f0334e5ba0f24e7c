//! Error types for the dashboard.

use agency_board::BoardError;
use agency_repository::StoreError;
use thiserror::Error;

/// Errors that can occur during dashboard initialization or while running a command.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The backend could not be opened or reached.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Schema migrations failed.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// A store operation failed.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// A board operation failed.
    #[error("Board error: {0}")]
    BoardError(#[from] BoardError),
}

impl DashboardError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    /// Create a migration error.
    pub fn migration(msg: impl Into<String>) -> Self {
        Self::MigrationError(msg.into())
    }
}
