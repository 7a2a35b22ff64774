//! # Discount Engine
//!
//! Percent and fixed discounts applied to the cart.
//!
//! ## Freezing Policy
//! The discount amount is computed against the subtotal **at application
//! time** and stored as a fixed number of cents. It is NOT re-derived when
//! the cart later changes: a 10% discount taken on an 8,00 € subtotal stays
//! 0,80 € even if more items are added afterwards. Re-applying the discount
//! replaces the frozen amount; clearing resets it to zero.
//!
//! A consequence the register accepts: removing items under a frozen
//! discount can push the total below zero. The ledger records the exact
//! arithmetic; presentation is the view's problem.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

/// The active discount on a cart. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, stored in basis points (1000 = 10%).
    Percent { bps: u32 },
    /// Fixed amount in cents.
    Fixed { amount_cents: i64 },
}

impl Cart {
    /// Applies a percentage discount against the current subtotal.
    ///
    /// ## Validation
    /// pct must satisfy `0 < pct <= 100` (NaN rejected by the same check).
    ///
    /// ## Freezing
    /// discount = subtotal × pct/100, rounded half-up, frozen from then on.
    pub fn apply_percent_discount(&mut self, pct: f64) -> CoreResult<()> {
        if !(pct > 0.0 && pct <= 100.0) {
            return Err(ValidationError::OutOfRange {
                field: "discount percent".to_string(),
                min: 0,
                max: 100,
            }
            .into());
        }

        let bps = (pct * 100.0).round() as u32;
        let amount = self.subtotal().fraction_bps(bps);

        self.active_discount = Some(Discount::Percent { bps });
        self.discount_cents = amount.cents();
        self.recompute_totals();

        Ok(())
    }

    /// Applies a fixed discount amount.
    ///
    /// ## Validation
    /// amount must be positive and must not exceed the current subtotal.
    /// On failure the cart is left unchanged.
    pub fn apply_fixed_discount(&mut self, amount: Money) -> CoreResult<()> {
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "discount".to_string(),
            }
            .into());
        }

        if amount.cents() > self.subtotal_cents() {
            return Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 1,
                max: self.subtotal_cents(),
            }
            .into());
        }

        self.active_discount = Some(Discount::Fixed {
            amount_cents: amount.cents(),
        });
        self.discount_cents = amount.cents();
        self.recompute_totals();

        Ok(())
    }

    /// Clears the active discount and recomputes totals.
    pub fn clear_discount(&mut self) {
        self.active_discount = None;
        self.discount_cents = 0;
        self.recompute_totals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_subtotal_800() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
        assert_eq!(cart.subtotal_cents(), 800);
        cart
    }

    #[test]
    fn test_percent_discount_exact_arithmetic() {
        let mut cart = cart_with_subtotal_800();

        cart.apply_percent_discount(10.0).unwrap();

        // discount = 8,00 € × 10% = 0,80 €; total = 8,00 + 1,60 − 0,80
        assert_eq!(cart.discount_cents(), 80);
        assert_eq!(cart.total_cents(), 880);
        assert!(matches!(
            cart.active_discount(),
            Some(Discount::Percent { bps: 1000 })
        ));
    }

    #[test]
    fn test_percent_discount_bounds() {
        let mut cart = cart_with_subtotal_800();

        assert!(cart.apply_percent_discount(0.0).is_err());
        assert!(cart.apply_percent_discount(-5.0).is_err());
        assert!(cart.apply_percent_discount(100.1).is_err());
        assert!(cart.apply_percent_discount(f64::NAN).is_err());

        // Failed applications leave the cart untouched
        assert_eq!(cart.discount_cents(), 0);
        assert_eq!(cart.total_cents(), 960);

        assert!(cart.apply_percent_discount(100.0).is_ok());
        assert_eq!(cart.discount_cents(), 800);
    }

    #[test]
    fn test_fixed_discount() {
        let mut cart = cart_with_subtotal_800();

        cart.apply_fixed_discount(Money::from_cents(150)).unwrap();

        assert_eq!(cart.discount_cents(), 150);
        assert_eq!(cart.total_cents(), 810);
    }

    #[test]
    fn test_fixed_discount_exceeding_subtotal_leaves_state_unchanged() {
        let mut cart = cart_with_subtotal_800();
        cart.apply_fixed_discount(Money::from_cents(100)).unwrap();

        let err = cart.apply_fixed_discount(Money::from_cents(900));
        assert!(err.is_err());

        // Previous discount still in effect
        assert_eq!(cart.discount_cents(), 100);
        assert_eq!(cart.total_cents(), 860);
    }

    #[test]
    fn test_fixed_discount_must_be_positive() {
        let mut cart = cart_with_subtotal_800();

        assert!(cart.apply_fixed_discount(Money::zero()).is_err());
        assert!(cart.apply_fixed_discount(Money::from_cents(-50)).is_err());
    }

    #[test]
    fn test_discount_is_frozen_when_items_added_later() {
        let mut cart = cart_with_subtotal_800();
        cart.apply_percent_discount(10.0).unwrap();
        assert_eq!(cart.discount_cents(), 80);

        // Adding another item does NOT rescale the percent discount
        cart.add_item("Juice", Money::from_cents(1000), 1).unwrap();

        assert_eq!(cart.subtotal_cents(), 1800);
        assert_eq!(cart.discount_cents(), 80);
        assert_eq!(cart.total_cents(), 1800 + 360 - 80);
    }

    #[test]
    fn test_new_discount_replaces_previous() {
        let mut cart = cart_with_subtotal_800();

        cart.apply_percent_discount(10.0).unwrap();
        cart.apply_fixed_discount(Money::from_cents(200)).unwrap();

        assert_eq!(cart.discount_cents(), 200);
        assert!(matches!(
            cart.active_discount(),
            Some(Discount::Fixed { amount_cents: 200 })
        ));
    }

    #[test]
    fn test_clear_discount() {
        let mut cart = cart_with_subtotal_800();
        cart.apply_percent_discount(25.0).unwrap();

        cart.clear_discount();

        assert!(cart.active_discount().is_none());
        assert_eq!(cart.discount_cents(), 0);
        assert_eq!(cart.total_cents(), 960);
    }

    #[test]
    fn test_total_may_go_negative_under_frozen_discount() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        let muffin = cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();

        // Discount frozen against the 8,00 € subtotal...
        cart.apply_fixed_discount(Money::from_cents(700)).unwrap();
        // ...then the cart shrinks under it
        cart.remove_item(&muffin.id).unwrap();

        // 5,00 + 1,00 − 7,00 = −1,00: recorded as-is, not clamped
        assert_eq!(cart.total_cents(), -100);
    }
}
