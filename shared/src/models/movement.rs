//! Stock movement model and the arithmetic behind the ledger
//!
//! A movement is immutable once created. An entry increases a product's
//! stock and names the supplier the goods came from; an exit decreases it
//! and names the sector the goods were issued to. The pure arithmetic
//! lives here so the ledger invariants are testable without a database.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entry,
    Exit,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entry",
            MovementKind::Exit => "exit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entry" => Some(MovementKind::Entry),
            "exit" => Some(MovementKind::Exit),
            _ => None,
        }
    }

    /// Apply a movement of this kind to a stock level.
    ///
    /// Returns the new stock quantity, or an error when the movement is
    /// not applicable. Stock may reach exactly zero but never go below.
    pub fn apply(&self, stock: i32, quantity: i32) -> Result<i32, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity(quantity));
        }
        match self {
            MovementKind::Entry => stock
                .checked_add(quantity)
                .ok_or(StockError::Overflow),
            MovementKind::Exit => {
                if quantity > stock {
                    Err(StockError::Insufficient {
                        available: stock,
                        requested: quantity,
                    })
                } else {
                    Ok(stock - quantity)
                }
            }
        }
    }
}

/// Errors from applying a movement to a stock level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("quantity must be a positive integer, got {0}")]
    NonPositiveQuantity(i32),

    #[error("insufficient stock: available {available}, requested {requested}")]
    Insufficient { available: i32, requested: i32 },

    #[error("stock quantity overflow")]
    Overflow,
}

/// A recorded stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    /// Day the goods physically moved (not the insertion timestamp)
    pub moved_on: NaiveDate,
    /// Set for entries, null for exits
    pub supplier_id: Option<Uuid>,
    /// Set for exits, null for entries
    pub sector_id: Option<Uuid>,
    /// User who registered the movement
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Movement {
    /// Check the kind/reference invariant: an entry carries a supplier and
    /// no sector, an exit carries a sector and no supplier.
    pub fn references_consistent(&self) -> bool {
        match self.kind {
            MovementKind::Entry => self.supplier_id.is_some() && self.sector_id.is_none(),
            MovementKind::Exit => self.sector_id.is_some() && self.supplier_id.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(kind: MovementKind, supplier: Option<Uuid>, sector: Option<Uuid>) -> Movement {
        Movement {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            kind,
            quantity: 5,
            moved_on: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            supplier_id: supplier,
            sector_id: sector,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_increments() {
        assert_eq!(MovementKind::Entry.apply(10, 5), Ok(15));
    }

    #[test]
    fn test_exit_decrements() {
        assert_eq!(MovementKind::Exit.apply(10, 4), Ok(6));
    }

    #[test]
    fn test_exit_to_exactly_zero() {
        assert_eq!(MovementKind::Exit.apply(10, 10), Ok(0));
    }

    #[test]
    fn test_exit_overdraw_rejected() {
        assert_eq!(
            MovementKind::Exit.apply(10, 15),
            Err(StockError::Insufficient {
                available: 10,
                requested: 15
            })
        );
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert_eq!(
            MovementKind::Entry.apply(10, 0),
            Err(StockError::NonPositiveQuantity(0))
        );
        assert_eq!(
            MovementKind::Exit.apply(10, -3),
            Err(StockError::NonPositiveQuantity(-3))
        );
    }

    #[test]
    fn test_entry_overflow_rejected() {
        assert_eq!(MovementKind::Entry.apply(i32::MAX, 1), Err(StockError::Overflow));
    }

    #[test]
    fn test_entry_references() {
        let m = movement(MovementKind::Entry, Some(Uuid::new_v4()), None);
        assert!(m.references_consistent());

        let m = movement(MovementKind::Entry, None, None);
        assert!(!m.references_consistent());

        let m = movement(MovementKind::Entry, Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        assert!(!m.references_consistent());
    }

    #[test]
    fn test_exit_references() {
        let m = movement(MovementKind::Exit, None, Some(Uuid::new_v4()));
        assert!(m.references_consistent());

        let m = movement(MovementKind::Exit, Some(Uuid::new_v4()), None);
        assert!(!m.references_consistent());
    }
}
