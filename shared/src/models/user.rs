//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Roles within the warehouse
///
/// The warehouse keeper registers movements and manages the catalog;
/// staff have read-only access to products and their details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    WarehouseKeeper,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::WarehouseKeeper => "warehouse_keeper",
            Role::Staff => "staff",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "warehouse_keeper" => Some(Role::WarehouseKeeper),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Whether this role may register movements and edit the catalog
    pub fn can_manage_stock(&self) -> bool {
        matches!(self, Role::WarehouseKeeper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::WarehouseKeeper, Role::Staff] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_only_keeper_manages_stock() {
        assert!(Role::WarehouseKeeper.can_manage_stock());
        assert!(!Role::Staff.can_manage_stock());
    }
}
