//! JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::traits::ContactStore;
use super::types::ContactMap;
use crate::error::{ContactsError, Result};
use crate::fs::write_atomic;

/// File name used when the storage path points at a directory.
pub const DEFAULT_FILENAME: &str = "ab.json";

/// Stores the contact map as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`, or at `path/ab.json` if `path` is a directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.is_dir() {
            path.join(DEFAULT_FILENAME)
        } else {
            path.to_path_buf()
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStore for JsonFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<ContactMap>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no contact file yet");
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| ContactsError::load(&self.path, e))?;
        let contacts: ContactMap =
            serde_json::from_str(&content).map_err(|e| ContactsError::load(&self.path, e))?;
        Ok(Some(contacts))
    }

    fn save(&mut self, contacts: &ContactMap) -> Result<()> {
        let content = serde_json::to_string_pretty(contacts)
            .map_err(|e| ContactsError::write(&self.path, e))?;
        write_atomic(&self.path, content.as_bytes())
            .map_err(|e| ContactsError::write(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = content.len(), "contact file written");
        Ok(())
    }
}
