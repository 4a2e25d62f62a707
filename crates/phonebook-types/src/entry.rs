use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EntryId;

/// A stored directory entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub number: String,
}

impl Entry {
    pub fn new(id: EntryId, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
        }
    }
}

/// An entry that has passed field validation but has no id yet.
///
/// Only the directory service constructs these; stores receive them and
/// assign the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub number: String,
}

impl NewEntry {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Attach a store-assigned id.
    pub fn with_id(self, id: EntryId) -> Entry {
        Entry {
            id,
            name: self.name,
            number: self.number,
        }
    }
}

/// User-supplied fields of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Number,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
