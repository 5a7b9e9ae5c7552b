//! Catalog reference entities: categories, suppliers, and sectors
//!
//! These records are read-only from the ledger's perspective; movements
//! reference them but never mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A supplier that goods are received from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    /// Registered legal name
    pub legal_name: String,
    /// Brazilian company tax id (CNPJ), 14 digits
    pub tax_id: String,
    pub created_at: DateTime<Utc>,
}

/// An internal sector that goods are issued to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    pub id: Uuid,
    pub name: String,
    pub manager_name: String,
    pub created_at: DateTime<Utc>,
}
