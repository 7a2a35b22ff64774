//! # Saved-Product Catalog Repository
//!
//! Database operations for the quick-pick product catalog: the named,
//! fixed-price buttons the cashier taps instead of typing a price.
//!
//! Names are the business key and collate case-insensitively, so saving
//! "café" next to an existing "Café" is rejected as a duplicate.

use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::SavedProduct;

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.catalog();
///
/// repo.save(&SavedProduct { name: "Café".into(), price_cents: 250 }).await?;
/// let products = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    name: String,
    price_cents: i64,
}

impl From<ProductRow> for SavedProduct {
    fn from(row: ProductRow) -> Self {
        SavedProduct {
            name: row.name,
            price_cents: row.price_cents,
        }
    }
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists catalog entries in the order they were saved.
    ///
    /// An empty or freshly created store yields an empty vector.
    pub async fn list(&self) -> DbResult<Vec<SavedProduct>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT name, price_cents FROM saved_products ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(SavedProduct::from).collect())
    }

    /// Looks up a catalog entry by name (case-insensitive).
    pub async fn get(&self, name: &str) -> DbResult<Option<SavedProduct>> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT name, price_cents FROM saved_products WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(SavedProduct::from))
    }

    /// Saves a new catalog entry.
    ///
    /// ## Errors
    /// `DbError::DuplicateProduct` when a product with the same name
    /// (case-insensitive) already exists.
    pub async fn save(&self, product: &SavedProduct) -> DbResult<()> {
        debug!(name = %product.name, price = product.price_cents, "Saving catalog product");

        let now = Utc::now();

        sqlx::query(
            "INSERT INTO saved_products (name, price_cents, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The only unique key on this table is the NOCASE name
            match e.as_database_error().map(|d| d.kind()) {
                Some(ErrorKind::UniqueViolation) => DbError::DuplicateProduct {
                    name: product.name.clone(),
                },
                _ => e.into(),
            }
        })?;

        Ok(())
    }

    /// Removes a catalog entry by name (case-insensitive).
    ///
    /// ## Errors
    /// `DbError::ProductNotFound` when no product carries the name.
    pub async fn remove(&self, name: &str) -> DbResult<()> {
        debug!(name = %name, "Removing catalog product");

        let result = sqlx::query("DELETE FROM saved_products WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::ProductNotFound {
                name: name.to_string(),
            });
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
