//! The address book: records keyed by name, plus dirty-tracked persistence.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ContactsError, Result};
use crate::fields::Name;
use crate::record::{Record, SearchQuery};
use crate::storage::{ContactMap, ContactStore, JsonFileStore};

/// Collection of contacts keyed by name.
///
/// Every mutation sets the dirty flag; only a successful [`flush`] clears it.
///
/// [`flush`]: AddressBook::flush
pub struct AddressBook {
    records: HashMap<String, Record>,
    dirty: bool,
    store: Box<dyn ContactStore>,
}

impl AddressBook {
    /// Open the JSON file at `path` (or `path/ab.json` for a directory).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(JsonFileStore::new(path))
    }

    /// Load every record from `store`.
    ///
    /// A store with nothing in it yields an empty book. Any record that fails
    /// validation fails the whole load.
    pub fn load(store: impl ContactStore + 'static) -> Result<Self> {
        let mut records = HashMap::new();
        if let Some(contacts) = store.load()? {
            for (key, stored) in contacts {
                if key != stored.name.as_str() {
                    return Err(ContactsError::load(
                        store.location(),
                        format!(
                            "entry '{}' holds a contact named '{}'",
                            key,
                            stored.name.as_str()
                        ),
                    ));
                }
                records.insert(key, Record::from(stored));
            }
        }
        info!(path = %store.location().display(), count = records.len(), "address book loaded");
        Ok(Self {
            records,
            dirty: false,
            store: Box::new(store),
        })
    }

    pub fn location(&self) -> &Path {
        self.store.location()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Fail with `DuplicateName` if a contact called `name` exists.
    pub fn check_available(&self, name: &Name) -> Result<()> {
        if self.contains(name.as_str()) {
            return Err(ContactsError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Insert or overwrite a record by name. Returns the replaced record.
    pub fn add(&mut self, record: Record) -> Option<Record> {
        debug!(name = record.name.as_str(), "contact saved");
        self.dirty = true;
        self.records.insert(record.name.to_string(), record)
    }

    /// Remove a record by name.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        let removed = self.records.remove(name);
        if removed.is_some() {
            debug!(name, "contact deleted");
            self.dirty = true;
        }
        removed
    }

    /// Apply `change` to the live record called `name`.
    ///
    /// `change` reports whether it actually modified the record; only then is
    /// the book marked dirty.
    pub fn modify<F>(&mut self, name: &str, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Record) -> bool,
    {
        let record = self
            .records
            .get_mut(name)
            .ok_or_else(|| ContactsError::NotFound(name.to_string()))?;
        let changed = change(record);
        if changed {
            debug!(name, "contact updated");
            self.dirty = true;
        }
        Ok(changed)
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted names split into pages of at most `page_size`.
    ///
    /// With a query (non-empty), only names whose record matches it are kept.
    /// A `page_size` of 0 is treated as 1.
    pub fn select(&self, page_size: usize, query: Option<&str>) -> Pages {
        let names = match query.filter(|q| !q.is_empty()) {
            None => self.names(),
            Some(query) => match SearchQuery::new(query) {
                None => Vec::new(),
                Some(query) => {
                    let mut names: Vec<String> = self
                        .records
                        .iter()
                        .filter(|(_, record)| query.matches(record))
                        .map(|(name, _)| name.clone())
                        .collect();
                    names.sort();
                    names
                }
            },
        };
        Pages::new(names, page_size)
    }

    /// Write the book to its store if anything changed since the last flush.
    ///
    /// Returns whether a write happened. On failure the book stays dirty.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let contacts: ContactMap = self
            .records
            .iter()
            .map(|(name, record)| (name.clone(), record.into()))
            .collect();
        match self.store.save(&contacts) {
            Ok(()) => {
                self.dirty = false;
                info!(path = %self.location().display(), count = contacts.len(), "address book saved");
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "address book save failed");
                Err(err)
            }
        }
    }
}

/// Sorted names split into fixed-size pages.
///
/// A plain value: iterating it twice yields the same pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    names: Vec<String>,
    page_size: usize,
}

impl Pages {
    fn new(names: Vec<String>, page_size: usize) -> Self {
        Self {
            names,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.names.len().div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of names across all pages.
    pub fn total(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.names.chunks(self.page_size).nth(index)
    }

    pub fn iter(&self) -> std::slice::Chunks<'_, String> {
        self.names.chunks(self.page_size)
    }
}

impl<'a> IntoIterator for &'a Pages {
    type Item = &'a [String];
    type IntoIter = std::slice::Chunks<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
