//! # Contacts Core
//!
//! Core library for Contacts - an interactive, menu-driven address book.
//!
//! This crate provides the domain logic, persistence and the interactive
//! session state machine independent of the terminal front end.
//!
//! ## Architecture
//!
//! - **fields**: Validated name, phone, e-mail and birthday values
//! - **record**: A single contact and its search predicate
//! - **book**: The address book with sorted, paged and filtered listing
//! - **storage**: Store trait with JSON file and in-memory backends
//! - **session**: The modal main menu / add wizard / edit menu state machine

pub mod book;
pub mod error;
pub mod fields;
pub mod fs;
pub mod record;
pub mod session;
pub mod storage;

pub use book::{AddressBook, Pages};
pub use error::{ContactsError, Result};
pub use fields::{
    local_today, validate_birthday, validate_email, validate_name, validate_phone, Birthday,
    Email, Name, Phone, MIN_YEAR,
};
pub use record::{Record, SearchQuery, ROW_WIDTHS};
pub use session::{Mode, Notice, Session, SessionInput, State, Step};
pub use storage::{ContactStore, JsonFileStore, MemoryStore, DEFAULT_FILENAME};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
