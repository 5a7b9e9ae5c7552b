//! Reporting service: read-only aggregates over the movement ledger
//!
//! Each report is a single SQL aggregate, so results always reflect a
//! committed snapshot: a movement and the stock change it caused commit
//! together and are therefore visible together.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::ledger::{MovementRow, MovementView, MOVEMENT_LISTING_SELECT};
use shared::types::DateRange;
use shared::validation::validate_date_range;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// A grouped report row: label plus summed quantity
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GroupedTotal {
    pub label: String,
    pub total: i64,
}

/// Pivot row over (sector, category)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SectorCategoryPivot {
    pub sector: String,
    pub category: String,
    pub total: i64,
}

/// Average exit quantity for a product
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ProductExitAverage {
    pub product_id: Uuid,
    pub product_name: String,
    pub average_quantity: Decimal,
    pub exit_count: i64,
}

/// Valued stock for a category
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CategoryStockValue {
    pub category: String,
    pub total_value: Decimal,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Total exit quantity per sector, largest consumer first.
    ///
    /// Quantities keep their stored positive sign.
    pub async fn consumption_by_sector(&self) -> AppResult<Vec<GroupedTotal>> {
        let rows = sqlx::query_as::<_, GroupedTotal>(
            r#"
            SELECT s.name AS label, SUM(m.quantity)::BIGINT AS total
            FROM movements m
            JOIN sectors s ON s.id = m.sector_id
            WHERE m.kind = 'exit'
            GROUP BY s.name
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Exit quantities pivoted by sector and product category
    pub async fn consumption_pivot(&self) -> AppResult<Vec<SectorCategoryPivot>> {
        let rows = sqlx::query_as::<_, SectorCategoryPivot>(
            r#"
            SELECT s.name AS sector, c.name AS category, SUM(m.quantity)::BIGINT AS total
            FROM movements m
            JOIN sectors s ON s.id = m.sector_id
            JOIN products p ON p.id = m.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE m.kind = 'exit'
            GROUP BY s.name, c.name
            ORDER BY s.name, c.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Arithmetic mean of exit quantity per product
    pub async fn average_exit_by_product(&self) -> AppResult<Vec<ProductExitAverage>> {
        let rows = sqlx::query_as::<_, ProductExitAverage>(
            r#"
            SELECT p.id AS product_id, p.name AS product_name,
                   AVG(m.quantity) AS average_quantity,
                   COUNT(m.id) AS exit_count
            FROM movements m
            JOIN products p ON p.id = m.product_id
            WHERE m.kind = 'exit'
            GROUP BY p.id, p.name
            ORDER BY p.name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Movements inside a date range, both boundary days included,
    /// newest first, with resolved references
    pub async fn movements_in_range(&self, range: DateRange) -> AppResult<Vec<MovementView>> {
        validate_date_range(&range).map_err(|msg| AppError::Validation {
            field: "start/end".to_string(),
            message: msg.to_string(),
        })?;

        let query = format!(
            "{} WHERE m.moved_on BETWEEN $1 AND $2 ORDER BY m.moved_on DESC, m.created_at DESC",
            MOVEMENT_LISTING_SELECT
        );

        let rows = sqlx::query_as::<_, MovementRow>(&query)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(MovementView::try_from).collect()
    }

    /// Stock value (quantity times unit price) per category, for products
    /// currently in stock
    pub async fn valued_stock_by_category(&self) -> AppResult<Vec<CategoryStockValue>> {
        let rows = sqlx::query_as::<_, CategoryStockValue>(
            r#"
            SELECT c.name AS category, SUM(p.stock_quantity * p.unit_price) AS total_value
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.stock_quantity > 0
            GROUP BY c.name
            ORDER BY total_value DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
