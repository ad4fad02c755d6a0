//! Key-value byte stores backing the snapshot.
//!
//! The tracker only ever reads and writes one blob under one key, but the
//! store is keyed so the same medium can be shared with other callers.
//!
//! # Atomic Writes
//!
//! `FileStore` writes each value with write-to-temp-then-rename:
//! 1. Write to `<key>.json.tmp`
//! 2. fsync the file
//! 3. Rename to `<key>.json`
//! 4. fsync the directory
//!
//! Readers see either the old or the new value, never a partial write.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A byte store addressed by string keys.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the value stored under `key`.
    ///
    /// Implementations must not expose a partially written value.
    fn put(&self, key: &str, value: &[u8]) -> io::Result<()>;
}

/// A store that keeps one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(value)?;
            file.sync_all()?;
        }

        std::fs::rename(&tmp_path, &path)?;
        sync_dir(&self.dir)
    }
}

/// Syncs a directory so a rename inside it survives power loss.
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

/// An in-process store. Values are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `value` already stored under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let values = self
            .values
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> io::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
