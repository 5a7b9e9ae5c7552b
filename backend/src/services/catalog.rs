//! Catalog service for categories, suppliers and sectors
//!
//! Reference data only: these records are looked up by the ledger but
//! never mutated by it. Deleting a record that movements or products
//! still reference is refused.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Category, Sector, Supplier};
use shared::validation::{validate_cnpj, validate_name};

/// Catalog service for reference entities
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Input for creating or renaming a category
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

/// Input for creating or updating a supplier
#[derive(Debug, Deserialize)]
pub struct SupplierInput {
    pub legal_name: String,
    pub tax_id: String,
}

/// Input for creating or updating a sector
#[derive(Debug, Deserialize)]
pub struct SectorInput {
    pub name: String,
    pub manager_name: String,
}

/// Map constraint violations onto domain errors
fn constraint_error(err: sqlx::Error, entity: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => return AppError::DuplicateEntry(entity.to_string()),
            // foreign_key_violation
            Some("23503") => {
                return AppError::Conflict {
                    resource: entity.to_string(),
                    message: format!("{} is still referenced by other records", entity),
                }
            }
            _ => {}
        }
    }
    AppError::DatabaseError(err)
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn create_category(&self, input: CategoryInput) -> AppResult<Category> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, created_at",
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(|e| constraint_error(e, "Category"))?;

        Ok(Category {
            id,
            name: input.name.trim().to_string(),
            created_at,
        })
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at)| Category {
                id,
                name,
                created_at,
            })
            .collect())
    }

    pub async fn get_category(&self, id: Uuid) -> AppResult<Category> {
        let row = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(Category {
            id: row.0,
            name: row.1,
            created_at: row.2,
        })
    }

    pub async fn update_category(&self, id: Uuid, input: CategoryInput) -> AppResult<Category> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let result = sqlx::query("UPDATE categories SET name = $1 WHERE id = $2")
            .bind(input.name.trim())
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Category"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        self.get_category(id).await
    }

    pub async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Category"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Suppliers
    // ------------------------------------------------------------------

    pub async fn create_supplier(&self, input: SupplierInput) -> AppResult<Supplier> {
        validate_name(&input.legal_name).map_err(|msg| AppError::Validation {
            field: "legal_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_cnpj(&input.tax_id).map_err(|msg| AppError::Validation {
            field: "tax_id".to_string(),
            message: msg.to_string(),
        })?;

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO suppliers (legal_name, tax_id) VALUES ($1, $2) RETURNING id, created_at",
        )
        .bind(input.legal_name.trim())
        .bind(&input.tax_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| constraint_error(e, "Supplier"))?;

        Ok(Supplier {
            id,
            legal_name: input.legal_name.trim().to_string(),
            tax_id: input.tax_id,
            created_at,
        })
    }

    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, legal_name, tax_id, created_at FROM suppliers ORDER BY legal_name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, legal_name, tax_id, created_at)| Supplier {
                id,
                legal_name,
                tax_id,
                created_at,
            })
            .collect())
    }

    pub async fn get_supplier(&self, id: Uuid) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, legal_name, tax_id, created_at FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(Supplier {
            id: row.0,
            legal_name: row.1,
            tax_id: row.2,
            created_at: row.3,
        })
    }

    pub async fn update_supplier(&self, id: Uuid, input: SupplierInput) -> AppResult<Supplier> {
        validate_name(&input.legal_name).map_err(|msg| AppError::Validation {
            field: "legal_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_cnpj(&input.tax_id).map_err(|msg| AppError::Validation {
            field: "tax_id".to_string(),
            message: msg.to_string(),
        })?;

        let result = sqlx::query("UPDATE suppliers SET legal_name = $1, tax_id = $2 WHERE id = $3")
            .bind(input.legal_name.trim())
            .bind(&input.tax_id)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Supplier"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        self.get_supplier(id).await
    }

    pub async fn delete_supplier(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Supplier"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Sectors
    // ------------------------------------------------------------------

    pub async fn create_sector(&self, input: SectorInput) -> AppResult<Sector> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_name(&input.manager_name).map_err(|msg| AppError::Validation {
            field: "manager_name".to_string(),
            message: msg.to_string(),
        })?;

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO sectors (name, manager_name) VALUES ($1, $2) RETURNING id, created_at",
        )
        .bind(input.name.trim())
        .bind(input.manager_name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(|e| constraint_error(e, "Sector"))?;

        Ok(Sector {
            id,
            name: input.name.trim().to_string(),
            manager_name: input.manager_name.trim().to_string(),
            created_at,
        })
    }

    pub async fn list_sectors(&self) -> AppResult<Vec<Sector>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, name, manager_name, created_at FROM sectors ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, manager_name, created_at)| Sector {
                id,
                name,
                manager_name,
                created_at,
            })
            .collect())
    }

    pub async fn get_sector(&self, id: Uuid) -> AppResult<Sector> {
        let row = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, name, manager_name, created_at FROM sectors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sector".to_string()))?;

        Ok(Sector {
            id: row.0,
            name: row.1,
            manager_name: row.2,
            created_at: row.3,
        })
    }

    pub async fn update_sector(&self, id: Uuid, input: SectorInput) -> AppResult<Sector> {
        validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_name(&input.manager_name).map_err(|msg| AppError::Validation {
            field: "manager_name".to_string(),
            message: msg.to_string(),
        })?;

        let result = sqlx::query("UPDATE sectors SET name = $1, manager_name = $2 WHERE id = $3")
            .bind(input.name.trim())
            .bind(input.manager_name.trim())
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Sector"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sector".to_string()));
        }

        self.get_sector(id).await
    }

    pub async fn delete_sector(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sectors WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| constraint_error(e, "Sector"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sector".to_string()));
        }

        Ok(())
    }
}
