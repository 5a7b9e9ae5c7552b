//! Business logic services for the Warehouse Stock Management Platform

pub mod auth;
pub mod catalog;
pub mod export;
pub mod ledger;
pub mod product;
pub mod reporting;
pub mod storage;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use export::ExportService;
pub use ledger::LedgerService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use storage::StorageService;
