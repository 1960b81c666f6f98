//! Infrastructure layer: snapshot persistence, the write-through store, config.

pub mod config;
pub mod inventory_store;
pub mod snapshot;

pub use config::StoreConfig;
pub use inventory_store::{InventoryStore, StoreError};
pub use snapshot::{
    FileSnapshotStore, InMemorySnapshotStore, PersistenceError, SnapshotStore, decode, encode,
};
