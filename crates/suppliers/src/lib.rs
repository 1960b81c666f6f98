//! Suppliers domain module.
//!
//! Suppliers reference the products they provide by ID only; products live
//! independently in the inventory.

pub mod supplier;

pub use supplier::{NewSupplier, Supplier};
