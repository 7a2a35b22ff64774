//! # Register Session
//!
//! The single session object that owns the register's mutable state.
//!
//! ## Session Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Session                                       │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────┐      │
//! │  │     Cart     │  │ PaymentReconciler│  │     SalesHistory     │      │
//! │  │              │  │                  │  │                      │      │
//! │  │  items       │  │  Idle /          │  │  Vec<Sale> (memory)  │      │
//! │  │  discount    │  │  AwaitingConfirm │  │  + SQLite write-thru │      │
//! │  │  totals      │  │                  │  │                      │      │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐                                │
//! │  │RegisterConfig│  │     Database     │ ── catalog repository          │
//! │  └──────────────┘  └──────────────────┘                                │
//! │                                                                         │
//! │  Exactly one Session exists per running process; the view glue owns    │
//! │  it and calls plain methods - no listener registration, no globals.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Control Flow
//! View glue mutates the cart → cart recomputes totals → discount engine
//! may adjust → reconciler validates tender → on confirmation a `Sale` is
//! emitted, recorded to history, and the cart is reset for the next
//! customer.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use till_core::{
    validation, Cart, CoreError, Discount, LineItem, Money, PaymentMethod, PaymentReconciler,
    PaymentSummary, Sale, SavedProduct, TaxRate,
};
use till_db::Database;

use crate::config::RegisterConfig;
use crate::error::RegisterError;
use crate::history::{DailyTotals, SalesHistory};
use crate::receipt::Receipt;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, RegisterError>;

/// Read-only snapshot of the cart for the view layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub active_discount: Option<Discount>,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items().to_vec(),
            subtotal_cents: cart.subtotal_cents(),
            tax_rate_bps: cart.tax_rate().bps(),
            tax_cents: cart.tax_cents(),
            active_discount: cart.active_discount().copied(),
            discount_cents: cart.discount_cents(),
            total_cents: cart.total_cents(),
        }
    }
}

/// The register session: one per process, owned by the controller.
#[derive(Debug)]
pub struct Session {
    config: RegisterConfig,
    db: Database,
    cart: Cart,
    reconciler: PaymentReconciler,
    history: SalesHistory,
}

impl Session {
    /// Opens a session: hydrates the sales history and starts an empty
    /// cart at the configured tax rate.
    pub async fn open(config: RegisterConfig, db: Database) -> SessionResult<Self> {
        let history = SalesHistory::load(db.history()).await?;
        let cart = Cart::with_tax_rate(TaxRate::from_bps(config.tax_rate_bps));

        info!(
            store = %config.store_name,
            tax_rate_bps = config.tax_rate_bps,
            past_sales = history.len(),
            "Register session opened"
        );

        Ok(Session {
            config,
            db,
            cart,
            reconciler: PaymentReconciler::new(),
            history,
        })
    }

    /// The session configuration.
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Adds a line item to the cart.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> SessionResult<LineItem> {
        let item = self.cart.add_item(name, unit_price, quantity)?;
        debug!(name = %item.name, quantity, total = self.cart.total_cents(), "Item added");
        Ok(item)
    }

    /// Adds one unit of a saved catalog product to the cart.
    pub async fn add_product_to_cart(&mut self, name: &str) -> SessionResult<LineItem> {
        let product = self
            .db
            .catalog()
            .get(name)
            .await?
            .ok_or_else(|| RegisterError::not_found("Product", name))?;

        Ok(self.cart.add_item(&product.name, product.price(), 1)?)
    }

    /// Removes the most recently added line item. No-op when empty.
    pub fn remove_last_item(&mut self) -> Option<LineItem> {
        self.cart.remove_last_item()
    }

    /// Removes a line item by id.
    pub fn remove_item(&mut self, id: &str) -> SessionResult<LineItem> {
        Ok(self.cart.remove_item(id)?)
    }

    /// Clears the cart (items and discount).
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
    }

    /// Read-only cart snapshot for display.
    pub fn cart_view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    // -------------------------------------------------------------------------
    // Discount operations
    // -------------------------------------------------------------------------

    /// Applies a percentage discount against the current subtotal.
    pub fn apply_percent_discount(&mut self, pct: f64) -> SessionResult<()> {
        self.cart.apply_percent_discount(pct)?;
        debug!(pct, discount = self.cart.discount_cents(), "Percent discount applied");
        Ok(())
    }

    /// Applies a fixed discount amount.
    pub fn apply_fixed_discount(&mut self, amount: Money) -> SessionResult<()> {
        self.cart.apply_fixed_discount(amount)?;
        debug!(amount = amount.cents(), "Fixed discount applied");
        Ok(())
    }

    /// Clears the active discount.
    pub fn clear_discount(&mut self) {
        self.cart.clear_discount();
    }

    // -------------------------------------------------------------------------
    // Payment operations
    // -------------------------------------------------------------------------

    /// Validates a payment and moves the reconciler to AwaitingConfirmation.
    ///
    /// No history side effect: cancelling afterwards leaves no trace.
    pub fn process_payment(
        &mut self,
        method: PaymentMethod,
        tendered: Option<Money>,
    ) -> SessionResult<PaymentSummary> {
        let summary = self.reconciler.process_payment(&self.cart, method, tendered)?;
        debug!(method = ?method, total = summary.total_cents, "Payment processed");
        Ok(summary)
    }

    /// The payment summary awaiting confirmation, if any.
    pub fn pending_payment(&self) -> Option<&PaymentSummary> {
        self.reconciler.pending()
    }

    /// Confirms the pending payment.
    ///
    /// Emits the immutable sale, clears the cart for the next customer and
    /// appends the sale to history. A persistence failure is surfaced but
    /// the in-memory history already holds the sale.
    pub async fn confirm_payment(&mut self) -> SessionResult<Sale> {
        let sale = self.reconciler.confirm(&self.cart)?;
        self.cart.clear();

        info!(
            sale_id = %sale.id,
            total = sale.total_cents,
            method = ?sale.payment_method,
            "Sale confirmed"
        );

        self.history.record(sale.clone()).await?;
        Ok(sale)
    }

    /// Abandons the pending payment without touching history.
    pub fn cancel_payment(&mut self) {
        self.reconciler.cancel();
        debug!("Payment cancelled");
    }

    // -------------------------------------------------------------------------
    // History queries
    // -------------------------------------------------------------------------

    /// The last `n` sales, most-recent-first.
    pub fn recent_sales(&self, n: usize) -> Vec<Sale> {
        self.history.list_recent(n)
    }

    /// Count and takings for one local calendar date.
    pub fn daily_summary(&self, date: NaiveDate) -> DailyTotals {
        self.history.daily_aggregate(date)
    }

    /// Count and takings for today (local timezone).
    pub fn todays_summary(&self) -> DailyTotals {
        self.daily_summary(Local::now().date_naive())
    }

    /// Number of sales recorded in this history.
    pub fn sales_count(&self) -> usize {
        self.history.len()
    }

    /// Empties the sales history. Irreversible; the view layer asks the
    /// user for confirmation before calling this.
    pub async fn clear_history(&mut self) -> SessionResult<()> {
        self.history.clear().await?;
        Ok(())
    }

    /// Builds the receipt snapshot for a sale.
    pub fn receipt_for(&self, sale: &Sale) -> Receipt {
        Receipt::build(sale, &self.config)
    }

    // -------------------------------------------------------------------------
    // Saved-product catalog
    // -------------------------------------------------------------------------

    /// Lists the saved-product catalog in saved order.
    pub async fn saved_products(&self) -> SessionResult<Vec<SavedProduct>> {
        Ok(self.db.catalog().list().await?)
    }

    /// Saves a new quick-pick product.
    ///
    /// ## Errors
    /// Validation error for an empty name or non-positive price; a
    /// duplicate name (case-insensitive) is rejected by the store.
    pub async fn save_product(&self, name: &str, price: Money) -> SessionResult<SavedProduct> {
        validation::validate_item_name(name)
            .map_err(|e| RegisterError::from(CoreError::from(e)))?;
        validation::validate_product_price_cents(price.cents())
            .map_err(|e| RegisterError::from(CoreError::from(e)))?;

        let product = SavedProduct {
            name: name.trim().to_string(),
            price_cents: price.cents(),
        };
        self.db.catalog().save(&product).await?;

        info!(name = %product.name, price = product.price_cents, "Product saved");
        Ok(product)
    }

    /// Removes a saved product by name (case-insensitive).
    pub async fn remove_product(&self, name: &str) -> SessionResult<()> {
        self.db.catalog().remove(name).await?;
        info!(name = %name, "Product removed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
