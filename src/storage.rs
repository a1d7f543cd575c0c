//! Key-value store for client preferences such as the last chosen language.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

/// Key holding the last chosen translation language.
pub const LANGUAGE_KEY: &str = "translation_language";

#[derive(Error, Debug)]
pub enum StoreError {
    /// The file could not be read or written
    #[error("Failed to access preference file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON object of strings
    #[error("Failed to parse preference file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simple get/set preference storage.
pub trait PreferenceStore {
    /// # Errors
    /// Backing storage could not be read
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Backing storage could not be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Preferences kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored preferences
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with one entry.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        Self { values: HashMap::from([(key.to_string(), value.to_string())]) }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object.
///
/// The file is read once on open and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Backing file
    path: PathBuf,
    /// Contents of the file
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store, starting empty when the file does not exist yet.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("Preference file not found: {:?}", path);
            HashMap::new()
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
