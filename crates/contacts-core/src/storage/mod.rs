//! Persistence for the address book.
//!
//! A [`ContactStore`] moves a [`ContactMap`] in and out of some medium. The
//! JSON file store is what the CLI uses; the in-memory store backs tests.

mod json_file;
mod memory;
mod traits;
mod types;

pub use json_file::{JsonFileStore, DEFAULT_FILENAME};
pub use memory::MemoryStore;
pub use traits::ContactStore;
pub use types::{ContactMap, StoredContact};
