//! Product service for catalog maintenance and lookups
//!
//! Stock quantities are deliberately not writable here: every stock
//! change goes through the ledger service so the movement history and the
//! counter can never drift apart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Product;
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::validate_name;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product. New products start with zero stock;
/// initial quantities are loaded through an entry movement.
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub category_id: Uuid,
}

/// Input for updating a product (stock excluded)
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
    pub category_id: Option<Uuid>,
}

/// Query parameters for the product listing
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name or description
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

type ProductTuple = (
    Uuid,
    String,
    String,
    i32,
    Decimal,
    Uuid,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn product_from_tuple(row: ProductTuple) -> Product {
    Product {
        id: row.0,
        name: row.1,
        description: row.2,
        stock_quantity: row.3,
        unit_price: row.4,
        category_id: row.5,
        image_path: row.6,
        created_at: row.7,
        updated_at: row.8,
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, stock_quantity, unit_price, category_id, \
                               image_path, created_at, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        if input.unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price must not be negative".to_string(),
            });
        }

        let category_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(input.category_id)
                .fetch_one(&self.db)
                .await?;

        if !category_exists {
            return Err(AppError::NotFound("Category".to_string()));
        }

        let query = format!(
            "INSERT INTO products (name, description, unit_price, category_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductTuple>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.unit_price)
            .bind(input.category_id)
            .fetch_one(&self.db)
            .await?;

        Ok(product_from_tuple(row))
    }

    /// List products, optionally filtered by a search term, alphabetically
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> AppResult<PaginatedResponse<Product>> {
        let pagination = Pagination {
            page: filter.page.unwrap_or(1),
            per_page: filter.per_page.unwrap_or(20).min(100),
        };
        let pattern = filter
            .search
            .as_deref()
            .map(|term| format!("%{}%", term.trim()));

        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products \
             WHERE $1::TEXT IS NULL OR name ILIKE $1 OR description ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.db)
        .await?;

        let query = format!(
            "SELECT {} FROM products \
             WHERE $1::TEXT IS NULL OR name ILIKE $1 OR description ILIKE $1 \
             ORDER BY name ASC LIMIT $2 OFFSET $3",
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProductTuple>(&query)
            .bind(&pattern)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(product_from_tuple).collect(),
            pagination: PaginationMeta::new(&pagination, total_items as u64),
        })
    }

    pub async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let row = sqlx::query_as::<_, ProductTuple>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product_from_tuple(row))
    }

    pub async fn update_product(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let existing = self.get_product(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let description = input.description.unwrap_or(existing.description);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let category_id = input.category_id.unwrap_or(existing.category_id);

        validate_name(&name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        if unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price must not be negative".to_string(),
            });
        }

        if category_id != existing.category_id {
            let category_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            )
            .bind(category_id)
            .fetch_one(&self.db)
            .await?;

            if !category_exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        let query = format!(
            "UPDATE products SET name = $1, description = $2, unit_price = $3, \
             category_id = $4, updated_at = NOW() WHERE id = $5 RETURNING {}",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductTuple>(&query)
            .bind(name.trim())
            .bind(&description)
            .bind(unit_price)
            .bind(category_id)
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(product_from_tuple(row))
    }

    /// Record a new image path for a product, returning the replaced path
    /// so the caller can remove the old file.
    pub async fn set_image_path(&self, id: Uuid, path: &str) -> AppResult<Option<String>> {
        let mut tx = self.db.begin().await?;

        let previous = sqlx::query_scalar::<_, Option<String>>(
            "SELECT image_path FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        sqlx::query("UPDATE products SET image_path = $1, updated_at = NOW() WHERE id = $2")
            .bind(path)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(previous)
    }

    /// Delete a product, returning its stored image path (if any) so the
    /// caller can clean up the file. Refused while movements reference it.
    pub async fn delete_product(&self, id: Uuid) -> AppResult<Option<String>> {
        let image_path = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM products WHERE id = $1 RETURNING image_path",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.code().as_deref() == Some("23503") {
                    return AppError::Conflict {
                        resource: "Product".to_string(),
                        message: "Product has recorded movements and cannot be deleted"
                            .to_string(),
                    };
                }
            }
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(image_path)
    }
}
