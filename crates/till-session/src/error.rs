//! # Register Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Till                                  │
//! │                                                                         │
//! │  View glue                        Session                               │
//! │  ─────────                        ───────                               │
//! │                                                                         │
//! │  session.apply_fixed_discount(900)                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session method                                                  │  │
//! │  │  Result<T, RegisterError>                                        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core error?  ── CoreError::Validation(...) ──┐                 │  │
//! │  │         │                                      ▼                 │  │
//! │  │  Db error?    ── DbError::DuplicateProduct ─ RegisterError ────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The view translates { code, message } into a user-facing dialog.      │
//! │  The session never talks to the user itself.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use till_core::CoreError;
use till_db::DbError;

/// Error returned from session operations.
///
/// ## Serialization
/// This is what the view glue receives when an operation fails:
/// ```json
/// {
///   "code": "PAYMENT_ERROR",
///   "message": "Insufficient funds: 500 tendered against 960 due"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (line item, catalog product, sale)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Durable store read/write failed
    DatabaseError,

    /// Cart precondition failed (e.g. paying an empty cart)
    CartError,

    /// Payment reconciliation failed
    PaymentError,

    /// Internal error
    Internal,
}

impl RegisterError {
    /// Creates a new register error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RegisterError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        RegisterError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        RegisterError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        RegisterError::new(ErrorCode::Internal, message)
    }
}

/// Converts core ledger errors to register errors.
impl From<CoreError> for RegisterError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => RegisterError::not_found("Line item", &id),
            CoreError::EmptyCart => RegisterError::new(ErrorCode::CartError, err.to_string()),
            CoreError::InvalidTotal { .. }
            | CoreError::InsufficientFunds { .. }
            | CoreError::InvalidPaymentState => {
                RegisterError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::Validation(e) => RegisterError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to register errors.
impl From<DbError> for RegisterError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ProductNotFound { name } => RegisterError::not_found("Product", &name),
            DbError::DuplicateProduct { name } => RegisterError::new(
                ErrorCode::ValidationError,
                format!("A product named '{}' already exists", name),
            ),
            DbError::ConnectionFailed(_) => {
                RegisterError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                RegisterError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                RegisterError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                RegisterError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                RegisterError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                RegisterError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for RegisterError {}
