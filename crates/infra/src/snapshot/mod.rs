//! Snapshot persistence: the flat-text codec and the media it is written to.
//!
//! The codec and the storage medium are independent: `codec` turns an
//! [`Inventory`](ims_inventory::Inventory) into text and back, and a
//! [`SnapshotStore`] only moves opaque text.

pub mod codec;
pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use codec::{ORDERS_HEADER, PRODUCTS_HEADER, SUPPLIERS_HEADER, decode, encode};
pub use file::{DEFAULT_DB_FILE, FileSnapshotStore};
pub use in_memory::InMemorySnapshotStore;
pub use r#trait::{PersistenceError, SnapshotStore};
