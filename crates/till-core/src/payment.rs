//! # Payment Reconciler
//!
//! Validates tender against the cart total and, on confirmation, produces
//! the immutable [`Sale`] record.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Payment Lifecycle                                   │
//! │                                                                         │
//! │                 process_payment() ok                                    │
//! │   ┌────────┐ ──────────────────────────► ┌──────────────────────┐      │
//! │   │  Idle  │                             │ AwaitingConfirmation │      │
//! │   └────────┘ ◄────────────────────────── └──────────────────────┘      │
//! │        ▲          cancel()                     │                        │
//! │        │                                       │ confirm()              │
//! │        │                                       ▼                        │
//! │        │                              Sale (snapshot) emitted,          │
//! │        └────────────────────────────  reconciler back to Idle           │
//! │                                                                         │
//! │  • process_payment while already awaiting REPLACES the pending          │
//! │    summary (the cashier reopened the tender dialog)                     │
//! │  • confirm from Idle fails with InvalidPaymentState                     │
//! │  • cancel never fails and never touches history                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Sale};

/// What the cashier sees in the tender dialog before confirming.
///
/// Cash fields are present only for [`PaymentMethod::Cash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    pub total_cents: i64,
    pub tendered_cents: Option<i64>,
    pub change_cents: Option<i64>,
}

impl PaymentSummary {
    /// Change due as Money (zero for non-cash methods).
    pub fn change(&self) -> Money {
        Money::from_cents(self.change_cents.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Default)]
enum TenderState {
    #[default]
    Idle,
    AwaitingConfirmation(PaymentSummary),
}

/// The payment reconciliation state machine.
///
/// One per session; it never touches the history itself - the session
/// records the emitted [`Sale`].
#[derive(Debug, Clone, Default)]
pub struct PaymentReconciler {
    state: TenderState,
}

impl PaymentReconciler {
    /// Creates a reconciler in the Idle state.
    pub fn new() -> Self {
        PaymentReconciler {
            state: TenderState::Idle,
        }
    }

    /// True while a payment summary is waiting for confirmation.
    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.state, TenderState::AwaitingConfirmation(_))
    }

    /// The pending payment summary, if any.
    pub fn pending(&self) -> Option<&PaymentSummary> {
        match &self.state {
            TenderState::AwaitingConfirmation(summary) => Some(summary),
            TenderState::Idle => None,
        }
    }

    /// Validates a payment against the cart and moves to AwaitingConfirmation.
    ///
    /// ## Preconditions
    /// - cart non-empty (`EmptyCart`)
    /// - total positive (`InvalidTotal`)
    /// - for cash: tendered (absent = zero) ≥ total (`InsufficientFunds`)
    ///
    /// No history side effect: the sale only exists after [`confirm`].
    ///
    /// [`confirm`]: PaymentReconciler::confirm
    pub fn process_payment(
        &mut self,
        cart: &Cart,
        method: PaymentMethod,
        tendered: Option<Money>,
    ) -> CoreResult<PaymentSummary> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if cart.total_cents() <= 0 {
            return Err(CoreError::InvalidTotal {
                total_cents: cart.total_cents(),
            });
        }

        let summary = match method {
            PaymentMethod::Cash => {
                let tendered = tendered.unwrap_or_else(Money::zero);
                if tendered < cart.total() {
                    return Err(CoreError::InsufficientFunds {
                        total_cents: cart.total_cents(),
                        tendered_cents: tendered.cents(),
                    });
                }
                PaymentSummary {
                    method,
                    total_cents: cart.total_cents(),
                    tendered_cents: Some(tendered.cents()),
                    change_cents: Some((tendered - cart.total()).cents()),
                }
            }
            PaymentMethod::Card | PaymentMethod::Check => PaymentSummary {
                method,
                total_cents: cart.total_cents(),
                tendered_cents: None,
                change_cents: None,
            },
        };

        self.state = TenderState::AwaitingConfirmation(summary.clone());
        Ok(summary)
    }

    /// Confirms the pending payment, emitting the immutable sale snapshot.
    ///
    /// ## Snapshot Pattern
    /// The cart lines and totals are deep-copied into the `Sale`; nothing
    /// the cashier does afterwards can rewrite the record. The reconciler
    /// returns to Idle - it is the caller's job to record the sale and
    /// start a fresh cart.
    ///
    /// ## Errors
    /// `InvalidPaymentState` when no payment is awaiting confirmation.
    pub fn confirm(&mut self, cart: &Cart) -> CoreResult<Sale> {
        match std::mem::take(&mut self.state) {
            TenderState::Idle => Err(CoreError::InvalidPaymentState),
            TenderState::AwaitingConfirmation(summary) => Ok(Sale {
                id: Uuid::new_v4().to_string(),
                created_at: Utc::now(),
                items: cart.items().to_vec(),
                subtotal_cents: cart.subtotal_cents(),
                tax_cents: cart.tax_cents(),
                discount_cents: cart.discount_cents(),
                total_cents: cart.total_cents(),
                payment_method: summary.method,
                cash_received_cents: summary.tendered_cents,
                change_given_cents: summary.change_cents,
            }),
        }
    }

    /// Discards any pending payment and returns to Idle. Never fails.
    pub fn cancel(&mut self) {
        self.state = TenderState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_total_960() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
        assert_eq!(cart.total_cents(), 960);
        cart
    }

    #[test]
    fn test_cash_payment_computes_change() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        let summary = reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(1000)))
            .unwrap();

        assert_eq!(summary.total_cents, 960);
        assert_eq!(summary.tendered_cents, Some(1000));
        assert_eq!(summary.change_cents, Some(40));
        assert!(reconciler.is_awaiting_confirmation());
    }

    #[test]
    fn test_cash_payment_exact_tender() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        let summary = reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(960)))
            .unwrap();

        assert_eq!(summary.change_cents, Some(0));
    }

    #[test]
    fn test_cash_payment_insufficient_funds() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        let err = reconciler.process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(500)));
        assert!(matches!(
            err,
            Err(CoreError::InsufficientFunds {
                total_cents: 960,
                tendered_cents: 500
            })
        ));
        assert!(!reconciler.is_awaiting_confirmation());

        // Absent tender counts as zero
        let err = reconciler.process_payment(&cart, PaymentMethod::Cash, None);
        assert!(matches!(err, Err(CoreError::InsufficientFunds { .. })));
    }

    #[test]
    fn test_card_payment_has_no_cash_fields() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        let summary = reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();

        assert_eq!(summary.tendered_cents, None);
        assert_eq!(summary.change_cents, None);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        let mut reconciler = PaymentReconciler::new();

        let err = reconciler.process_payment(&cart, PaymentMethod::Card, None);
        assert!(matches!(err, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_non_positive_total_rejected() {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 2).unwrap();
        let muffin = cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
        cart.apply_fixed_discount(Money::from_cents(700)).unwrap();
        cart.remove_item(&muffin.id).unwrap();
        assert!(cart.total_cents() <= 0);

        let mut reconciler = PaymentReconciler::new();
        let err = reconciler.process_payment(&cart, PaymentMethod::Card, None);
        assert!(matches!(err, Err(CoreError::InvalidTotal { .. })));
    }

    #[test]
    fn test_confirm_without_process_fails() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        let err = reconciler.confirm(&cart);
        assert!(matches!(err, Err(CoreError::InvalidPaymentState)));
    }

    #[test]
    fn test_confirm_snapshots_the_cart() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(1000)))
            .unwrap();
        let sale = reconciler.confirm(&cart).unwrap();

        assert_eq!(sale.items, cart.items().to_vec());
        assert_eq!(sale.subtotal_cents, 800);
        assert_eq!(sale.tax_cents, 160);
        assert_eq!(sale.total_cents, 960);
        assert_eq!(sale.payment_method, PaymentMethod::Cash);
        assert_eq!(sale.cash_received_cents, Some(1000));
        assert_eq!(sale.change_given_cents, Some(40));

        // Back to Idle: a second confirm fails
        assert!(!reconciler.is_awaiting_confirmation());
        assert!(matches!(
            reconciler.confirm(&cart),
            Err(CoreError::InvalidPaymentState)
        ));
    }

    #[test]
    fn test_cancel_discards_pending_payment() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        reconciler
            .process_payment(&cart, PaymentMethod::Check, None)
            .unwrap();
        reconciler.cancel();

        assert!(!reconciler.is_awaiting_confirmation());
        assert!(matches!(
            reconciler.confirm(&cart),
            Err(CoreError::InvalidPaymentState)
        ));
    }

    #[test]
    fn test_reprocess_replaces_pending_summary() {
        let cart = cart_total_960();
        let mut reconciler = PaymentReconciler::new();

        reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(2000)))
            .unwrap();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();

        let pending = reconciler.pending().unwrap();
        assert_eq!(pending.method, PaymentMethod::Card);
        assert_eq!(pending.tendered_cents, None);
    }
}
