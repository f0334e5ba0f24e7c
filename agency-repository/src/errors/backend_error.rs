//! Backend error types.

use thiserror::Error;
use uuid::Uuid;

/// SQLSTATE raised by PostgreSQL on a foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE raised when a column named in a statement does not exist.
const UNDEFINED_COLUMN: &str = "42703";

/// Errors reported by a `CollectionBackend`.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// No row with the given id exists.
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    /// The write would leave other rows pointing at a missing record.
    #[error("Reference violation: {0}")]
    ReferenceViolation(String),

    /// The backend refused the write (constraint, type or validation failure).
    #[error("Write rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A row could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl BackendError {
    /// Create a reference violation error.
    pub fn reference_violation(msg: impl Into<String>) -> Self {
        Self::ReferenceViolation(msg.into())
    }

    /// Create a rejected write error.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => Self::ReferenceViolation(db.message().to_string()),
                Some(code)
                    if code.starts_with("22") || code.starts_with("23") || code == UNDEFINED_COLUMN =>
                {
                    Self::Rejected(db.message().to_string())
                }
                _ => Self::Database(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => Self::Connection(err.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::Serialization(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for BackendError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        Self::Connection(err.to_string())
    }
}
