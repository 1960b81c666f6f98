//! Inventory domain module.
//!
//! This crate owns the three record collections and the rules that tie them
//! together, implemented purely as deterministic domain logic (no IO, no
//! storage). Persistence wraps it from `ims-infra`.

pub mod inventory;
pub mod policy;
pub mod report;

pub use inventory::Inventory;
pub use policy::ReferencePolicy;
pub use report::{ReportKind, STOCK_REPORT_HEADER};
