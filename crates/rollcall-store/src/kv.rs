//! Key/value storage capability.
//!
//! The application persists each named collection as one text blob under a
//! stable key.  [`FileStore`] keeps one `<key>.json` file per blob in a
//! platform data directory; [`MemoryStore`] is the in-process fake injected
//! by tests and anything else that wants a throwaway store.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::error::{Result, StoreError};

/// Storage capability: text blobs addressed by key.
///
/// Implementations are injected into [`crate::Store`], which layers the
/// typed collections and fail-soft behavior on top.
pub trait KvStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob under `key`.  Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per blob.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (or create) the default application store.
    ///
    /// Blobs live in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/rollcall/`
    /// - macOS:   `~/Library/Application Support/com.rollcall.rollcall/`
    /// - Windows: `{FOLDERID_RoamingAppData}\rollcall\rollcall\data\`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "rollcall", "rollcall").ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) a store rooted at an explicit directory.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        tracing::info!(path = %root.display(), "opening file store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Directory holding the collection blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.blob_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store used as a test fake.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        blobs.remove(key);
        Ok(())
    }
}
