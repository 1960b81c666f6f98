use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::r#trait::{PersistenceError, SnapshotStore};

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "IMSDB.txt";

/// Single-file snapshot storage.
///
/// Writes go to a sibling `<name>.tmp` file which is synced and then renamed
/// over the target, so a crash mid-write leaves the previous snapshot intact.
/// The file is assumed to be owned by one process; there is no locking.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Default for FileSnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::io(&self.path, err)),
        }
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        let temp = self.temp_path();

        if let Err(err) = write_synced(&temp, snapshot.as_bytes()) {
            let _ = fs::remove_file(&temp);
            return Err(PersistenceError::io(&temp, err));
        }

        fs::rename(&temp, &self.path).map_err(|err| {
            let _ = fs::remove_file(&temp);
            PersistenceError::io(&self.path, err)
        })?;

        debug!(path = %self.path.display(), bytes = snapshot.len(), "snapshot written");
        Ok(())
    }
}

// The handle is dropped (closed) on every return path.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
