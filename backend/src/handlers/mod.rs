//! HTTP handlers for the Warehouse Stock Management Platform

pub mod auth;
pub mod catalog;
pub mod health;
pub mod ledger;
pub mod product;
pub mod reporting;

pub use auth::*;
pub use catalog::*;
pub use health::*;
pub use ledger::*;
pub use product::*;
pub use reporting::*;
