//! Storage trait definition.

use std::path::Path;

use super::types::ContactMap;
use crate::error::Result;

/// Storage interface for a persisted contact map.
///
/// Implementations must ensure:
/// - `load` never returns a partially decoded map: any bad record fails the
///   whole load
/// - `save` replaces the stored map atomically
pub trait ContactStore {
    /// Where the contacts live, for messages and logs.
    fn location(&self) -> &Path;

    /// Read the stored map.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet, which callers treat
    /// as an empty book.
    ///
    /// # Errors
    ///
    /// Returns `ContactsError::StorageLoad` if the data exists but cannot be
    /// read or fails validation.
    fn load(&self) -> Result<Option<ContactMap>>;

    /// Replace the stored map with `contacts`.
    ///
    /// # Errors
    ///
    /// Returns `ContactsError::StorageWrite` if the data cannot be written.
    fn save(&mut self, contacts: &ContactMap) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_boxed(_store: Box<dyn ContactStore>) {}
    }
}
