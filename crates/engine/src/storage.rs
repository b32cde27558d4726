//! Flat key-value storage.
//!
//! The ledger is persisted as a single entry: one key whose value is the
//! serialized transaction list. Values are opaque strings to the store.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::ResultEngine;

/// Key the ledger is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "tally.transactions";

/// Store file used when no other path is configured.
pub const DEFAULT_STORAGE_PATH: &str = "config/tally_storage.json";

/// String key-value store.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if the key was never
    /// written.
    fn get_item(&self, key: &str) -> ResultEngine<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> ResultEngine<()>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, `{"<key>": "<value>", ...}`.
///
/// A missing file reads as an empty store. The file is rewritten as a whole
/// on every `set_item`; other keys in it are preserved. Writes go to a
/// sibling `.tmp` file that is then renamed over the store, so an
/// interrupted write never leaves a truncated store behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_entries(&self) -> ResultEngine<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&entries)?;
        let temp = self.temp_path();
        fs::write(&temp, payload)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), key, "storage entry written");
        Ok(())
    }
}
