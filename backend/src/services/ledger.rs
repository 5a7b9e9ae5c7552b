//! Ledger service: the only writer of product stock quantities
//!
//! Registering a movement and adjusting the product's stock happen inside
//! one database transaction, with the product row locked for the duration.
//! Concurrent registrations against the same product serialize on that
//! row lock, so two exits can never jointly overdraw stock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Movement, MovementKind, StockError};
use shared::validation::validate_quantity;

/// Ledger service for registering and listing stock movements
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// Input for registering a stock entry (goods received from a supplier)
#[derive(Debug, Deserialize)]
pub struct RegisterEntryInput {
    pub product_id: Uuid,
    pub supplier_id: Uuid,
    pub quantity: i32,
    pub moved_on: NaiveDate,
}

/// Input for registering a stock exit (goods issued to a sector)
#[derive(Debug, Deserialize)]
pub struct RegisterExitInput {
    pub product_id: Uuid,
    pub sector_id: Uuid,
    pub quantity: i32,
    pub moved_on: NaiveDate,
}

/// A registered movement together with the stock level it produced
#[derive(Debug, Serialize)]
pub struct RegisteredMovement {
    #[serde(flatten)]
    pub movement: Movement,
    pub stock_after: i32,
}

/// Movement listing row with resolved references
#[derive(Debug, Serialize)]
pub struct MovementView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub moved_on: NaiveDate,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub sector_id: Option<Uuid>,
    pub sector_name: Option<String>,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Raw row for movement listings
#[derive(Debug, FromRow)]
pub(crate) struct MovementRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub kind: String,
    pub quantity: i32,
    pub moved_on: NaiveDate,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub sector_id: Option<Uuid>,
    pub sector_name: Option<String>,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MovementRow> for MovementView {
    type Error = AppError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let kind = MovementKind::parse(&row.kind)
            .ok_or_else(|| AppError::Internal(format!("Unknown movement kind: {}", row.kind)))?;
        Ok(MovementView {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            kind,
            quantity: row.quantity,
            moved_on: row.moved_on,
            supplier_id: row.supplier_id,
            supplier_name: row.supplier_name,
            sector_id: row.sector_id,
            sector_name: row.sector_name,
            user_id: row.user_id,
            user_name: row.user_name,
            created_at: row.created_at,
        })
    }
}

pub(crate) const MOVEMENT_LISTING_SELECT: &str = r#"
    SELECT m.id, m.product_id, p.name AS product_name, m.kind, m.quantity,
           m.moved_on, m.supplier_id, f.legal_name AS supplier_name,
           m.sector_id, s.name AS sector_name, m.user_id, u.name AS user_name,
           m.created_at
    FROM movements m
    JOIN products p ON p.id = m.product_id
    LEFT JOIN suppliers f ON f.id = m.supplier_id
    LEFT JOIN sectors s ON s.id = m.sector_id
    JOIN users u ON u.id = m.user_id
"#;

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a stock entry: insert the movement and increment the
    /// product's stock as one atomic unit.
    pub async fn register_entry(
        &self,
        user_id: Uuid,
        input: RegisterEntryInput,
    ) -> AppResult<RegisteredMovement> {
        self.register_movement(
            user_id,
            MovementKind::Entry,
            input.product_id,
            input.supplier_id,
            input.quantity,
            input.moved_on,
        )
        .await
    }

    /// Register a stock exit: insert the movement and decrement the
    /// product's stock as one atomic unit. Fails with `InsufficientStock`
    /// when the requested quantity exceeds the stock at evaluation time;
    /// the check and the decrement run under the same row lock.
    pub async fn register_exit(
        &self,
        user_id: Uuid,
        input: RegisterExitInput,
    ) -> AppResult<RegisteredMovement> {
        self.register_movement(
            user_id,
            MovementKind::Exit,
            input.product_id,
            input.sector_id,
            input.quantity,
            input.moved_on,
        )
        .await
    }

    /// List movements recorded against a product, newest first
    pub async fn product_movements(&self, product_id: Uuid) -> AppResult<Vec<MovementView>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let query = format!(
            "{} WHERE m.product_id = $1 ORDER BY m.moved_on DESC, m.created_at DESC",
            MOVEMENT_LISTING_SELECT
        );

        let rows = sqlx::query_as::<_, MovementRow>(&query)
            .bind(product_id)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(MovementView::try_from).collect()
    }

    /// Shared registration path for entries and exits.
    ///
    /// `counterpart_id` is the supplier for entries and the sector for
    /// exits; it is resolved before the product row is locked so that a
    /// bad reference never holds the lock.
    async fn register_movement(
        &self,
        user_id: Uuid,
        kind: MovementKind,
        product_id: Uuid,
        counterpart_id: Uuid,
        quantity: i32,
        moved_on: NaiveDate,
    ) -> AppResult<RegisteredMovement> {
        validate_quantity(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let (counterpart_table, counterpart_label) = match kind {
            MovementKind::Entry => ("suppliers", "Supplier"),
            MovementKind::Exit => ("sectors", "Sector"),
        };

        let counterpart_exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            counterpart_table
        ))
        .bind(counterpart_id)
        .fetch_one(&self.db)
        .await?;

        if !counterpart_exists {
            return Err(AppError::NotFound(counterpart_label.to_string()));
        }

        let mut tx = self.db.begin().await.map_err(AppError::from_ledger_tx)?;

        // Lock the product row: all stock mutations for this product
        // serialize here.
        let stock = sqlx::query_scalar::<_, i32>(
            "SELECT stock_quantity FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from_ledger_tx)?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let new_stock = kind.apply(stock, quantity).map_err(|err| match err {
            StockError::Insufficient {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            StockError::NonPositiveQuantity(_) => AppError::Validation {
                field: "quantity".to_string(),
                message: err.to_string(),
            },
            StockError::Overflow => AppError::ValidationError(err.to_string()),
        })?;

        sqlx::query("UPDATE products SET stock_quantity = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_stock)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_ledger_tx)?;

        let (supplier_id, sector_id) = match kind {
            MovementKind::Entry => (Some(counterpart_id), None),
            MovementKind::Exit => (None, Some(counterpart_id)),
        };

        let (movement_id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            r#"
            INSERT INTO movements (product_id, kind, quantity, moved_on, supplier_id, sector_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at
            "#,
        )
        .bind(product_id)
        .bind(kind.as_str())
        .bind(quantity)
        .bind(moved_on)
        .bind(supplier_id)
        .bind(sector_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_ledger_tx)?;

        tx.commit().await.map_err(AppError::from_ledger_tx)?;

        let movement = Movement {
            id: movement_id,
            product_id,
            kind,
            quantity,
            moved_on,
            supplier_id,
            sector_id,
            user_id,
            created_at,
        };

        tracing::info!(
            movement_id = %movement.id,
            product_id = %product_id,
            kind = kind.as_str(),
            quantity,
            stock_after = new_stock,
            "Registered stock movement"
        );

        Ok(RegisteredMovement {
            movement,
            stock_after: new_stock,
        })
    }
}
