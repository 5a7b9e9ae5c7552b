//! Domain models for the Warehouse Stock Management Platform

mod catalog;
mod movement;
mod product;
mod user;

pub use catalog::*;
pub use movement::*;
pub use product::*;
pub use user::*;
