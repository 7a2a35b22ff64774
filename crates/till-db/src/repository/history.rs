//! # Sale History Repository
//!
//! Durable storage for the append-only sale log.
//!
//! ## Sale Log Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Append-Only Sale Log                              │
//! │                                                                         │
//! │  confirm payment                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record(sale) ── one transaction ──► sales row + sale_items rows        │
//! │                                                                         │
//! │  Rows are immutable once written. The only destructive operation is    │
//! │  clear_all(), which empties the whole log after explicit user           │
//! │  confirmation at the view layer.                                        │
//! │                                                                         │
//! │  Ordering: the sales rowid is the append order; sale_items.position     │
//! │  is the receipt order within one sale.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::{LineItem, PaymentMethod, Sale};

/// Repository for the durable sale log.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

/// Sale row as stored, without its lines.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    created_at: DateTime<Utc>,
    subtotal_cents: i64,
    tax_cents: i64,
    discount_cents: i64,
    total_cents: i64,
    payment_method: PaymentMethod,
    cash_received_cents: Option<i64>,
    change_given_cents: Option<i64>,
}

/// Line snapshot row.
#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    id: String,
    name: String,
    unit_price_cents: i64,
    quantity: i64,
    line_total_cents: i64,
}

impl HistoryRepository {
    /// Creates a new HistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HistoryRepository { pool }
    }

    /// Appends a finalized sale to the log.
    ///
    /// The sale row and all its line snapshots are written in a single
    /// transaction, so the log never holds a sale without its lines.
    pub async fn record(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = sale.total_cents, items = sale.items.len(), "Recording sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, created_at,
                subtotal_cents, tax_cents, discount_cents, total_cents,
                payment_method, cash_received_cents, change_given_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.created_at)
        .bind(sale.subtotal_cents)
        .bind(sale.tax_cents)
        .bind(sale.discount_cents)
        .bind(sale.total_cents)
        .bind(sale.payment_method)
        .bind(sale.cash_received_cents)
        .bind(sale.change_given_cents)
        .execute(&mut *tx)
        .await?;

        for (position, item) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, position,
                    name, unit_price_cents, quantity, line_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&sale.id)
            .bind(position as i64)
            .bind(&item.name)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Loads the full sale log in append order.
    ///
    /// Used to hydrate the in-memory history at session startup.
    /// An empty or freshly created store yields an empty vector.
    pub async fn load_all(&self) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, created_at,
                   subtotal_cents, tax_cents, discount_cents, total_cents,
                   payment_method, cash_received_cents, change_given_cents
            FROM sales
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            sales.push(self.assemble(row).await?);
        }

        debug!(count = sales.len(), "Loaded sale log");
        Ok(sales)
    }

    /// Returns the last `n` sales, most-recent-first.
    ///
    /// `n` is naturally capped at the log size by the LIMIT clause.
    pub async fn list_recent(&self, n: usize) -> DbResult<Vec<Sale>> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, created_at,
                   subtotal_cents, tax_cents, discount_cents, total_cents,
                   payment_method, cash_received_cents, change_given_cents
            FROM sales
            ORDER BY rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(n as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            sales.push(self.assemble(row).await?);
        }

        Ok(sales)
    }

    /// Empties the whole log. Irreversible.
    ///
    /// The view layer asks the user for confirmation before this is called.
    pub async fn clear_all(&self) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sale_items").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM sales").execute(&mut *tx).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Sale log cleared");
        Ok(())
    }

    /// Counts sales in the log (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Attaches the line snapshots to a sale row, in receipt order.
    async fn assemble(&self, row: SaleRow) -> DbResult<Sale> {
        let items: Vec<SaleItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, unit_price_cents, quantity, line_total_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Sale {
            id: row.id,
            created_at: row.created_at,
            items: items
                .into_iter()
                .map(|i| LineItem {
                    id: i.id,
                    name: i.name,
                    unit_price_cents: i.unit_price_cents,
                    quantity: i.quantity,
                    line_total_cents: i.line_total_cents,
                })
                .collect(),
            subtotal_cents: row.subtotal_cents,
            tax_cents: row.tax_cents,
            discount_cents: row.discount_cents,
            total_cents: row.total_cents,
            payment_method: row.payment_method,
            cash_received_cents: row.cash_received_cents,
            change_given_cents: row.change_given_cents,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use till_core::{Cart, Money, PaymentReconciler};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Builds a finalized sale through the real core path.
    fn sample_sale(unit_cents: i64, qty: i64) -> Sale {
        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(unit_cents), qty)
            .unwrap();

        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(100_000)))
            .unwrap();
        reconciler.confirm(&cart).unwrap()
    }

    #[tokio::test]
    async fn test_record_and_load_round_trip() {
        let db = test_db().await;
        let repo = db.history();

        let sale = sample_sale(250, 2);
        repo.record(&sale).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, sale.id);
        assert_eq!(loaded[0].total_cents, sale.total_cents);
        assert_eq!(loaded[0].payment_method, PaymentMethod::Cash);
        assert_eq!(loaded[0].items.len(), 1);
        assert_eq!(loaded[0].items[0].name, "Coffee");
        assert_eq!(loaded[0].items[0].line_total_cents, 500);
    }

    #[tokio::test]
    async fn test_empty_store_reads_as_empty() {
        let db = test_db().await;
        let repo = db.history();

        assert!(repo.load_all().await.unwrap().is_empty());
        assert!(repo.list_recent(10).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_recent_is_most_recent_first_and_capped() {
        let db = test_db().await;
        let repo = db.history();

        let first = sample_sale(100, 1);
        let second = sample_sale(200, 1);
        let third = sample_sale(300, 1);
        repo.record(&first).await.unwrap();
        repo.record(&second).await.unwrap();
        repo.record(&third).await.unwrap();

        let recent = repo.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, third.id);
        assert_eq!(recent[1].id, second.id);

        // Asking for more than the log holds returns everything
        let all = repo.list_recent(50).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_item_order_preserved() {
        let db = test_db().await;
        let repo = db.history();

        let mut cart = Cart::new();
        cart.add_item("First", Money::from_cents(100), 1).unwrap();
        cart.add_item("Second", Money::from_cents(200), 1).unwrap();
        cart.add_item("Third", Money::from_cents(300), 1).unwrap();

        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        let sale = reconciler.confirm(&cart).unwrap();

        repo.record(&sale).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        let names: Vec<&str> = loaded[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_clear_all_empties_log_and_lines() {
        let db = test_db().await;
        let repo = db.history();

        repo.record(&sample_sale(250, 2)).await.unwrap();
        repo.record(&sample_sale(300, 1)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.clear_all().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        let orphan_lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphan_lines, 0);
    }

    #[tokio::test]
    async fn test_card_sale_has_no_cash_fields() {
        let db = test_db().await;
        let repo = db.history();

        let mut cart = Cart::new();
        cart.add_item("Coffee", Money::from_cents(250), 1).unwrap();
        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        let sale = reconciler.confirm(&cart).unwrap();

        repo.record(&sale).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded[0].cash_received_cents, None);
        assert_eq!(loaded[0].change_given_cents, None);
    }
}
