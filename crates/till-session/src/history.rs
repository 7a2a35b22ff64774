//! # Sales History
//!
//! The append-only log of finalized sales, as the session sees it.
//!
//! ## Two Layers, One Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sales History                                     │
//! │                                                                         │
//! │  session open ──► HistoryRepository::load_all() ──► Vec<Sale>          │
//! │                                                      (in memory)        │
//! │                                                                         │
//! │  record(sale):  1. push onto the in-memory log                          │
//! │                 2. write through to SQLite                              │
//! │                                                                         │
//! │  A failed write is surfaced to the caller, not retried; the            │
//! │  in-memory log remains authoritative for the running session.          │
//! │                                                                         │
//! │  Queries (recent, daily aggregate) are answered from memory by a        │
//! │  full scan each call - the log is small and append-only, so no          │
//! │  incremental cache is kept.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use till_core::{Money, Sale};
use till_db::{DbResult, HistoryRepository};

/// Count and total over one local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub count: usize,
    pub total_cents: i64,
}

impl DailyTotals {
    /// The day's takings as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// The session's sale log: in-memory authoritative, written through to
/// the durable store on every append.
#[derive(Debug)]
pub struct SalesHistory {
    sales: Vec<Sale>,
    repo: HistoryRepository,
}

impl SalesHistory {
    /// Hydrates the history from the durable store.
    ///
    /// A fresh install (empty tables) yields an empty history.
    pub async fn load(repo: HistoryRepository) -> DbResult<Self> {
        let sales = repo.load_all().await?;
        info!(count = sales.len(), "Sales history hydrated");
        Ok(SalesHistory { sales, repo })
    }

    /// Appends a finalized sale.
    ///
    /// The in-memory log is extended first; the write-through error, if
    /// any, is propagated after the fact so the caller can surface it.
    pub async fn record(&mut self, sale: Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = sale.total_cents, "Appending sale to history");
        self.sales.push(sale.clone());
        self.repo.record(&sale).await
    }

    /// The last `n` sales, most-recent-first. `n` is capped at the log size.
    pub fn list_recent(&self, n: usize) -> Vec<Sale> {
        self.sales.iter().rev().take(n).cloned().collect()
    }

    /// Count and total over sales whose timestamp falls on the given
    /// calendar date in the local timezone.
    ///
    /// Recomputed from the full log each call; no incremental cache.
    pub fn daily_aggregate(&self, date: NaiveDate) -> DailyTotals {
        let mut totals = DailyTotals {
            count: 0,
            total_cents: 0,
        };

        for sale in &self.sales {
            if sale.created_at.with_timezone(&Local).date_naive() == date {
                totals.count += 1;
                totals.total_cents += sale.total_cents;
            }
        }

        totals
    }

    /// Empties both layers of the log. Irreversible.
    pub async fn clear(&mut self) -> DbResult<()> {
        info!(discarded = self.sales.len(), "Clearing sales history");
        self.sales.clear();
        self.repo.clear_all().await
    }

    /// The full log in append order.
    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    /// Number of recorded sales.
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// True when no sale has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Cart, PaymentMethod, PaymentReconciler};
    use till_db::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sale_of(total_target_name: &str, unit_cents: i64, qty: i64) -> Sale {
        let mut cart = Cart::new();
        cart.add_item(total_target_name, Money::from_cents(unit_cents), qty)
            .unwrap();

        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        reconciler.confirm(&cart).unwrap()
    }

    #[tokio::test]
    async fn test_record_and_daily_aggregate() {
        let db = test_db().await;
        let mut history = SalesHistory::load(db.history()).await.unwrap();

        // Zero-rate carts so the recorded totals are exactly 10,00 and 25,50
        let mut cart = Cart::with_tax_rate(till_core::TaxRate::zero());
        cart.add_item("A", Money::from_cents(1000), 1).unwrap();
        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        history.record(reconciler.confirm(&cart).unwrap()).await.unwrap();

        let mut cart = Cart::with_tax_rate(till_core::TaxRate::zero());
        cart.add_item("B", Money::from_cents(2550), 1).unwrap();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        history.record(reconciler.confirm(&cart).unwrap()).await.unwrap();

        let today = Local::now().date_naive();
        let totals = history.daily_aggregate(today);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_cents, 3550); // 10,00 + 25,50 = 35,50
        assert_eq!(format!("{}", totals.total()), "35,50 €");
    }

    #[tokio::test]
    async fn test_daily_aggregate_other_date_is_empty() {
        let db = test_db().await;
        let mut history = SalesHistory::load(db.history()).await.unwrap();

        history.record(sale_of("Coffee", 250, 2)).await.unwrap();

        let other = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let totals = history.daily_aggregate(other);
        assert_eq!(totals.count, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[tokio::test]
    async fn test_list_recent_order_and_cap() {
        let db = test_db().await;
        let mut history = SalesHistory::load(db.history()).await.unwrap();

        let a = sale_of("A", 100, 1);
        let b = sale_of("B", 200, 1);
        let c = sale_of("C", 300, 1);
        history.record(a.clone()).await.unwrap();
        history.record(b.clone()).await.unwrap();
        history.record(c.clone()).await.unwrap();

        let recent = history.list_recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, c.id);
        assert_eq!(recent[1].id, b.id);

        assert_eq!(history.list_recent(99).len(), 3);
    }

    #[tokio::test]
    async fn test_history_survives_reload() {
        let db = test_db().await;

        let mut history = SalesHistory::load(db.history()).await.unwrap();
        let sale = sale_of("Coffee", 250, 2);
        history.record(sale.clone()).await.unwrap();

        // A second hydration from the same store sees the sale
        let reloaded = SalesHistory::load(db.history()).await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.all()[0].id, sale.id);
        assert_eq!(reloaded.all()[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_empties_both_layers() {
        let db = test_db().await;
        let mut history = SalesHistory::load(db.history()).await.unwrap();

        history.record(sale_of("Coffee", 250, 2)).await.unwrap();
        history.clear().await.unwrap();

        assert!(history.is_empty());

        let reloaded = SalesHistory::load(db.history()).await.unwrap();
        assert!(reloaded.is_empty());
    }
}
