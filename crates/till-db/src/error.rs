//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RegisterError (in till-session) ← Serialized for the view glue        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  View glue displays user-friendly message                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Can Actually Fail Here
//! The schema carries exactly two constraints user input can trip: the
//! case-insensitive name key on `saved_products` and the
//! `sale_items → sales` foreign key. Everything else on this surface is
//! infrastructure failing around the query (connection, migration,
//! transaction).

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback. Writes are never retried here:
/// a failed append is surfaced to the caller and the in-memory state
/// stays authoritative for the session.
#[derive(Debug, Error)]
pub enum DbError {
    /// No saved product carries the name.
    ///
    /// ## When This Occurs
    /// - Removing a catalog product by an unknown name
    /// - Tapping a quick-pick button for a product that was removed
    #[error("No saved product named '{name}'")]
    ProductNotFound { name: String },

    /// A saved product with the same name already exists.
    ///
    /// Names collate case-insensitively, so "café" collides with an
    /// existing "Café".
    #[error("A product named '{name}' already exists")]
    DuplicateProduct { name: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a sale line that references a missing sale row
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - The pool timed out or was closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// Database error, FK kind     → DbError::ForeignKeyViolation
/// Database error, other kind  → DbError::QueryFailed
/// Pool timed out / closed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
///
/// Unique violations are not classified here: the only unique key a
/// caller can trip is the saved-product name, and the catalog repository
/// maps that collision itself - it knows which name collided.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
