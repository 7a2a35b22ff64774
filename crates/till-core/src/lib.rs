//! # till-core: Pure Business Logic for the Till Register
//!
//! This crate is the **heart** of the register. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View / Controller Glue (external)               │   │
//! │  │    Product buttons ──► Cart UI ──► Tender UI ──► Receipt UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain method calls                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-session (Session)                       │   │
//! │  │    add_item, apply_discount, process_payment, confirm, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ till-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ discount  │  │  payment  │  │   │
//! │  │   │   Money   │  │   Cart    │  │  Discount │  │Reconciler │  │   │
//! │  │   │  TaxCalc  │  │ LineItem  │  │  freezing │  │   Sale    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO USER INTERACTION • PURE FUNCTIONS  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     till-db (Database Layer)                    │   │
//! │  │           SQLite sale log, saved-product catalog                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Sale, PaymentMethod, TaxRate, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The transaction in progress with stored derived totals
//! - [`discount`] - Percent / fixed discounts frozen at application time
//! - [`payment`] - Payment reconciliation state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::cart::Cart;
//! use till_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
//! cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
//!
//! // 8.00 subtotal + 20% VAT = 9.60 total
//! assert_eq!(cart.subtotal_cents(), 800);
//! assert_eq!(cart.total_cents(), 960);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use cart::{Cart, CartTotals};
pub use discount::Discount;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{PaymentReconciler, PaymentSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points (2000 = 20% VAT).
///
/// ## Why a constant?
/// v0.1 runs a single store with a single VAT rate. The rate is still
/// carried on each cart so per-store configuration can override it.
pub const DEFAULT_TAX_RATE_BPS: u32 = 2000;

/// Maximum distinct line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;
