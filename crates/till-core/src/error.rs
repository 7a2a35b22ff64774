//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  └── DbError          - Persistence read/write failures                │
//! │                                                                         │
//! │  till-session errors (separate crate)                                  │
//! │  └── RegisterError    - What the view glue sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RegisterError → View glue         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message at the view layer

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core ledger errors.
///
/// These errors represent business rule violations in the cart, discount
/// and payment components. They are returned synchronously to the caller,
/// never retried and never surfaced to the user from here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item cannot be found in the current cart.
    ///
    /// ## When This Occurs
    /// - Removing an item by id after it was already removed
    /// - A stale id held by the view after the cart was cleared
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// Payment was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Payment was attempted while the total is not positive.
    ///
    /// ## When This Occurs
    /// A frozen discount can push the total to zero or below after items
    /// are removed; such a cart cannot be tendered.
    #[error("Total must be positive, current total is {total_cents} cents")]
    InvalidTotal { total_cents: i64 },

    /// Cash tendered is lower than the amount due.
    ///
    /// ## User Workflow
    /// ```text
    /// Tender: 5,00 € against a 9,60 € total
    ///      │
    ///      ▼
    /// InsufficientFunds { total_cents: 960, tendered_cents: 500 }
    ///      │
    ///      ▼
    /// UI shows: "Montant insuffisant"
    /// ```
    #[error("Insufficient funds: {tendered_cents} tendered against {total_cents} due")]
    InsufficientFunds {
        total_cents: i64,
        tendered_cents: i64,
    },

    /// Confirm or similar was called outside AwaitingConfirmation.
    ///
    /// ## When This Occurs
    /// - `confirm` without a prior successful `process_payment`
    /// - `confirm` twice for the same pending payment
    #[error("No payment is awaiting confirmation")]
    InvalidPaymentState,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user-supplied input doesn't meet requirements.
/// Used for early validation before ledger logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientFunds {
            total_cents: 960,
            tendered_cents: 500,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: 500 tendered against 960 due"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "unit price".to_string(),
        };
        assert_eq!(err.to_string(), "unit price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
