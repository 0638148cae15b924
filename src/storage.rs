use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    File(#[from] confy::ConfyError),
}

/// Injected key-value capability the draft store persists through. Values are
/// plain strings so any origin-scoped store (browser local storage, a config
/// file, an in-memory map) can sit behind it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Ephemeral backend. Used as the substitutable fake in tests and for hosts
/// that opt out of durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

const PROFILE: &str = "drafts";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreFile {
    entries: BTreeMap<String, String>,
}

/// Durable backend keeping all entries in one confy-managed file. Every call
/// goes through the file, so separate handles on the same location observe
/// each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    location: Location,
}

#[derive(Debug, Clone)]
enum Location {
    Config { app: &'static str },
    Path(PathBuf),
}

impl FileStore {
    /// Keep entries in the OS config directory for `app`.
    pub fn new(app: &'static str) -> Self {
        Self {
            location: Location::Config { app },
        }
    }

    /// Keep entries in an explicit file instead.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::Path(path.into()),
        }
    }

    fn read(&self) -> Result<StoreFile, StorageError> {
        let file = match &self.location {
            Location::Config { app } => confy::load(app, PROFILE)?,
            Location::Path(path) => confy::load_path(path)?,
        };
        Ok(file)
    }

    fn write(&self, file: StoreFile) -> Result<(), StorageError> {
        match &self.location {
            Location::Config { app } => confy::store(app, PROFILE, file)?,
            Location::Path(path) => confy::store_path(path, file)?,
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut file = self.read()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.write(file)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut file = self.read()?;
        if file.entries.remove(key).is_some() {
            self.write(file)?;
        }
        Ok(())
    }
}
