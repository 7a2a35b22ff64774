//! # Cart
//!
//! The transaction in progress: an ordered collection of line items plus
//! stored derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Operations                              │
//! │                                                                         │
//! │  View Action              Session Call            Cart State Change     │
//! │  ───────────              ────────────            ─────────────────     │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► items.push(item)     │
//! │                                                                         │
//! │  Tap "remove last" ──────► remove_last_item() ──► items.pop()          │
//! │                                                                         │
//! │  Tap line's ✕ ───────────► remove_item(id) ─────► items.remove(i)      │
//! │                                                                         │
//! │  Tap "clear all" ────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  EVERY mutation ends in recompute_totals(): the cart is only           │
//! │  considered consistent once subtotal/tax/total have been rewritten.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Insertion order = display/receipt order
//! - subtotal = Σ line totals, tax = subtotal × rate, total = subtotal + tax − discount
//! - The discount amount is frozen at application time (see [`crate::discount`])
//! - total is NOT clamped at zero; the view decides how to present it

use serde::{Deserialize, Serialize};

use crate::discount::Discount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, TaxRate};
use crate::validation::{
    validate_cart_size, validate_item_name, validate_quantity, validate_unit_price_cents,
};

/// The cart for the transaction in progress.
///
/// Derived fields (`subtotal_cents`, `tax_cents`, `total_cents`) are stored
/// rather than recomputed on read, so a snapshot of the struct is always
/// internally consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    tax_rate: TaxRate,
    pub(crate) active_discount: Option<Discount>,
    pub(crate) discount_cents: i64,
    subtotal_cents: i64,
    tax_cents: i64,
    total_cents: i64,
}

impl Cart {
    /// Creates a new empty cart at the default VAT rate.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            tax_rate: TaxRate::default(),
            active_discount: None,
            discount_cents: 0,
            subtotal_cents: 0,
            tax_cents: 0,
            total_cents: 0,
        }
    }

    /// Creates a new empty cart with an explicit tax rate.
    pub fn with_tax_rate(tax_rate: TaxRate) -> Self {
        Cart {
            tax_rate,
            ..Cart::new()
        }
    }

    /// Adds a line item to the cart.
    ///
    /// ## Validation
    /// - name must be non-empty after trimming (≤ 200 chars)
    /// - unit price must be positive
    /// - quantity must be 1..=999
    /// - the cart must hold fewer than 100 items
    ///
    /// ## Returns
    /// A copy of the appended line item (the cart keeps the original).
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<LineItem> {
        validate_item_name(name)?;
        validate_unit_price_cents(unit_price.cents())?;
        validate_quantity(quantity)?;
        validate_cart_size(self.items.len())?;

        let item = LineItem::new(name.trim(), unit_price, quantity);
        self.items.push(item.clone());
        self.recompute_totals();

        Ok(item)
    }

    /// Removes the most recently added line item.
    ///
    /// No-op returning `None` when the cart is empty.
    pub fn remove_last_item(&mut self) -> Option<LineItem> {
        let removed = self.items.pop();
        if removed.is_some() {
            self.recompute_totals();
        }
        removed
    }

    /// Removes a line item by id.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` if no line carries the id.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let removed = self.items.remove(index);
        self.recompute_totals();
        Ok(removed)
    }

    /// Clears the cart: drops all items, resets the discount, zeroes totals.
    pub fn clear(&mut self) {
        self.items.clear();
        self.active_discount = None;
        self.discount_cents = 0;
        self.recompute_totals();
    }

    /// Recomputes the stored derived totals.
    ///
    /// Idempotent and side-effect-free beyond rewriting the three derived
    /// fields. Called after every structural mutation; also safe to call
    /// directly.
    pub fn recompute_totals(&mut self) {
        self.subtotal_cents = self.items.iter().map(|i| i.line_total_cents).sum();
        self.tax_cents = self.subtotal().calculate_tax(self.tax_rate).cents();
        self.total_cents = self.subtotal_cents + self.tax_cents - self.discount_cents;
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    /// The line items in insertion (= receipt) order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of line items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// The cart's tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The active discount, if one has been applied.
    pub fn active_discount(&self) -> Option<&Discount> {
        self.active_discount.as_ref()
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.subtotal_cents
    }

    pub fn tax_cents(&self) -> i64 {
        self.tax_cents
    }

    pub fn discount_cents(&self) -> i64 {
        self.discount_cents
    }

    pub fn total_cents(&self) -> i64 {
        self.total_cents
    }

    /// Subtotal before tax as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Tax amount as Money.
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Frozen discount amount as Money.
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Grand total as Money (may be negative, see module docs).
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Cart totals summary for read-only snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal_cents(),
            tax_cents: cart.tax_cents(),
            discount_cents: cart.discount_cents(),
            total_cents: cart.total_cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_updates_totals() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 500);
        assert_eq!(cart.tax_cents(), 100); // 20% VAT
        assert_eq!(cart.total_cents(), 600);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
        cart.add_item("Juice", Money::from_cents(450), 3).unwrap();

        let expected: i64 = cart.items().iter().map(|i| i.line_total_cents).sum();
        assert_eq!(cart.subtotal_cents(), expected);
        assert_eq!(cart.subtotal_cents(), 2150);
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut cart = Cart::new();

        assert!(cart.add_item("", Money::from_cents(100), 1).is_err());
        assert!(cart.add_item("  ", Money::from_cents(100), 1).is_err());
        assert!(cart.add_item("Coffee", Money::zero(), 1).is_err());
        assert!(cart.add_item("Coffee", Money::from_cents(-100), 1).is_err());
        assert!(cart.add_item("Coffee", Money::from_cents(100), 0).is_err());

        // Nothing was appended, totals untouched
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_add_item_trims_name() {
        let mut cart = Cart::new();
        let item = cart
            .add_item("  Coffee  ", Money::from_cents(250), 1)
            .unwrap();
        assert_eq!(item.name, "Coffee");
    }

    #[test]
    fn test_remove_last_item() {
        let mut cart = Cart::new();
        assert!(cart.remove_last_item().is_none());

        cart.add_item("Coffee", Money::from_cents(250), 1).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();

        let removed = cart.remove_last_item().unwrap();
        assert_eq!(removed.name, "Muffin");
        assert_eq!(cart.subtotal_cents(), 250);
        assert_eq!(cart.total_cents(), 300);
    }

    #[test]
    fn test_remove_item_by_id() {
        let mut cart = Cart::new();
        let coffee = cart.add_item("Coffee", Money::from_cents(250), 1).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();

        let removed = cart.remove_item(&coffee.id).unwrap();
        assert_eq!(removed.name, "Coffee");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal_cents(), 300);

        // Second removal of the same id fails
        assert!(matches!(
            cart.remove_item(&coffee.id),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        cart.apply_percent_discount(10.0).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.active_discount().is_none());
        assert_eq!(cart.subtotal_cents(), 0);
        assert_eq!(cart.tax_cents(), 0);
        assert_eq!(cart.discount_cents(), 0);
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_recompute_totals_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(333), 1).unwrap();

        let before = (cart.subtotal_cents(), cart.tax_cents(), cart.total_cents());
        cart.recompute_totals();
        cart.recompute_totals();
        let after = (cart.subtotal_cents(), cart.tax_cents(), cart.total_cents());

        assert_eq!(before, after);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item("First", Money::from_cents(100), 1).unwrap();
        cart.add_item("Second", Money::from_cents(200), 1).unwrap();
        cart.add_item("Third", Money::from_cents(300), 1).unwrap();

        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_zero_tax_rate_cart() {
        let mut cart = Cart::with_tax_rate(TaxRate::zero());
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();

        assert_eq!(cart.tax_cents(), 0);
        assert_eq!(cart.total_cents(), 500);
    }
}
