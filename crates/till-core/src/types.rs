//! # Domain Types
//!
//! Core domain types used throughout the Till register.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │      Sale       │   │  SavedProduct   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  name           │       │
//! │  │  name           │   │  items (frozen) │   │  price_cents    │       │
//! │  │  unit_price     │   │  totals         │   └─────────────────┘       │
//! │  │  quantity       │   │  payment_method │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Cash           │                             │
//! │  │  2000 = 20%     │   │  Card           │                             │
//! │  └─────────────────┘   │  Check          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Identity Pattern
//! Line items and sales carry UUID v4 ids generated at creation time.
//! A `Sale` freezes the cart lines it was confirmed from - later catalog
//! or cart changes never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20.00% (the French standard VAT rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Default is the standard VAT rate, not zero: every fresh cart taxes at
/// 20% unless the session config overrides it.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Single-tender only: one method per sale, no split payments.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment (tendered amount and change tracked).
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Paper check.
    Check,
}

impl PaymentMethod {
    /// Human-readable label for receipts and history listings.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Espèces",
            PaymentMethod::Card => "Carte",
            PaymentMethod::Check => "Chèque",
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the transaction in progress.
///
/// ## Ownership
/// Owned exclusively by the cart that created it; destroyed when removed
/// or when the cart is cleared. A confirmed sale keeps its own frozen copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier (UUID v4), generated when the item is added.
    pub id: String,

    /// Display name shown on the register and the receipt.
    pub name: String,

    /// Unit price in cents, locked in when the item was added.
    pub unit_price_cents: i64,

    /// Quantity sold.
    pub quantity: i64,

    /// Line total (unit_price × quantity), recomputed on any mutation.
    pub line_total_cents: i64,
}

impl LineItem {
    /// Creates a new line item with a fresh id and a derived line total.
    ///
    /// Inputs are assumed validated by the cart (see [`crate::validation`]).
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            quantity,
            line_total_cents: unit_price.multiply_quantity(quantity).cents(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized transaction record.
///
/// Immutable once created: exactly one `Sale` is produced per confirmed
/// payment, and nothing mutates it afterwards. Owned by the sales history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Frozen copy of the cart lines at confirmation time.
    pub items: Vec<LineItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// For cash: amount the customer handed over.
    pub cash_received_cents: Option<i64>,
    /// For cash: change returned to the customer.
    pub change_given_cents: Option<i64>,
}

impl Sale {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the discount amount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }
}

// =============================================================================
// Saved Product
// =============================================================================

/// A catalog entry the cashier can add to the cart with one tap.
///
/// Deliberately minimal: the register keys the catalog by name, so `name`
/// doubles as the business identifier (unique, case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProduct {
    /// Display name (unique within the catalog, case-insensitive).
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl SavedProduct {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert!((rate.percentage() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(20.0);
        assert_eq!(rate.bps(), 2000);

        let rate = TaxRate::from_percentage(5.5);
        assert_eq!(rate.bps(), 550);
    }

    #[test]
    fn test_tax_rate_default_is_standard_vat() {
        assert_eq!(TaxRate::default().bps(), crate::DEFAULT_TAX_RATE_BPS);
    }

    #[test]
    fn test_line_item_derives_total() {
        let item = LineItem::new("Coffee", Money::from_cents(250), 2);
        assert_eq!(item.line_total_cents, 500);
        assert_eq!(item.unit_price().cents(), 250);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "Espèces");
        assert_eq!(PaymentMethod::Card.label(), "Carte");
        assert_eq!(PaymentMethod::Check.label(), "Chèque");
    }
}
