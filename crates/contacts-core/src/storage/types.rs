//! Serialized form of the address book.
//!
//! The file is a JSON object keyed by contact name:
//!
//! ```json
//! {
//!   "Ann": {
//!     "name": "Ann",
//!     "birthday": "05-21",
//!     "email": null,
//!     "phone": ["380501234567"]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::{Birthday, Email, Name, Phone};
use crate::record::Record;

/// Stored contacts keyed by name. Sorted so that output is deterministic.
pub type ContactMap = BTreeMap<String, StoredContact>;

/// One stored contact. Every field is re-validated on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
    pub name: Name,
    #[serde(default)]
    pub birthday: Option<Birthday>,
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default)]
    pub phone: Vec<Phone>,
}

impl From<&Record> for StoredContact {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            birthday: record.birthday,
            email: record.email.clone(),
            phone: record.phones().to_vec(),
        }
    }
}

impl From<StoredContact> for Record {
    fn from(stored: StoredContact) -> Self {
        let mut record = Record::new(stored.name);
        record.birthday = stored.birthday;
        record.email = stored.email;
        record.add_phones(stored.phone);
        record
    }
}
