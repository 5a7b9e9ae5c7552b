//! Product model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked product
///
/// `stock_quantity` is owned by the ledger engine: it is only ever changed
/// in the same transaction that records the movement causing the change,
/// and it never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub stock_quantity: i32,
    pub unit_price: Decimal,
    pub category_id: Uuid,
    /// Relative path of the stored product image, if one was uploaded
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stock value of this product (quantity times unit price)
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.stock_quantity) * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample(stock: i32, price: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "A4 paper".to_string(),
            description: "500-sheet ream".to_string(),
            stock_quantity: stock,
            unit_price: Decimal::from_str(price).unwrap(),
            category_id: Uuid::new_v4(),
            image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_value() {
        let product = sample(40, "12.50");
        assert_eq!(product.stock_value(), Decimal::from_str("500.00").unwrap());
    }

    #[test]
    fn test_stock_value_zero_stock() {
        let product = sample(0, "99.90");
        assert_eq!(product.stock_value(), Decimal::ZERO);
    }
}
