//! Purchasing domain module.
//!
//! Orders hold their product by ID plus a frozen price snapshot
//! (`total_price`), so removing a product never invalidates an order in
//! memory.

pub mod order;

pub use order::{ORDER_DATE_FORMAT, Order, OrderDetails, OrderStatus, RestoredOrder};
