//! # Session Storage
//!
//! Durable key/value storage for the session record, the client-side
//! counterpart of a browser's local storage.
//!
//! ## File Layout
//! ```text
//! <storage dir>/
//! ├── usuario.json     ← session record (the only key written)
//! └── user.json        ← left by an earlier client; migrated, then removed
//! ```
//!
//! Writes go to a temporary file that is renamed over the target, so a
//! crash never leaves a half-written record behind.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Durable string storage keyed by name.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Removes the key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> ClientResult<()>;
}

fn storage_error(err: std::io::Error) -> ClientError {
    ClientError::Storage(err.to_string())
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> ClientResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ClientError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let path = self.path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(storage_error)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(storage_error)?;
        std::fs::rename(&tmp, &path).map_err(storage_error)?;

        debug!(?path, "Stored record");
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        match std::fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage. Used by tests and by one-shot runs that must not
/// leave a session behind.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ClientError::Storage("memory storage lock poisoned".into()))
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
