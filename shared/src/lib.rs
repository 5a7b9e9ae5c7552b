//! Shared types and models for the Warehouse Stock Management Platform
//!
//! This crate contains domain models, common types, and validation helpers
//! shared between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
