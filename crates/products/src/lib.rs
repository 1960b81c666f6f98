//! Products domain module.
//!
//! This crate contains the product record and its stock rules, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{NewProduct, Product};
