use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use ims_core::{OrderId, ProductId};

/// Failure reading, writing, or decoding the snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot line could not be decoded. `line` is 1-based.
    #[error("snapshot line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// An order references a product that is not in the snapshot (strict loads only).
    #[error("snapshot line {line}: order {order_id} references missing product {product_id}")]
    DanglingOrder {
        line: usize,
        order_id: OrderId,
        product_id: ProductId,
    },

    /// Backend-specific failure that is not an I/O error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Whole-snapshot storage medium.
///
/// Every write replaces the previous snapshot entirely; there is no append or
/// partial update.
pub trait SnapshotStore {
    /// Read the current snapshot, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored snapshot with `snapshot`.
    fn write(&self, snapshot: &str) -> Result<(), PersistenceError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        (**self).read()
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        (**self).write(snapshot)
    }
}
