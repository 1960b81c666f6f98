use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::r#trait::{PersistenceError, SnapshotStore};

/// In-memory snapshot storage.
///
/// Intended for tests/dev. Counts writes so callers can assert that failed
/// operations never reach storage.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshot: RwLock<Option<String>>,
    writes: AtomicUsize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing snapshot text (as if a previous run had saved it).
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Current snapshot text, if any.
    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.read().ok().and_then(|s| s.clone())
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| PersistenceError::Storage("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| PersistenceError::Storage("snapshot lock poisoned".to_string()))?;
        *guard = Some(snapshot.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
