//! Record identity and the listed record type.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Prefix every generated identifier starts with.
pub const RECORD_PREFIX: &str = "record_";
/// Extension of record files, without the dot.
pub const RECORD_EXTENSION: &str = "json";

/// How record identifiers are derived at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScheme {
    /// `record_<unixSeconds>`. Two inserts in the same second collide and
    /// the later one overwrites the earlier.
    #[default]
    Timestamp,
    /// `record_<unixSeconds>_<token>` with a random token; never collides.
    Unique,
}

/// Identifier of a stored record; also the record file's stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// `record_<seconds>` for the given instant, truncated to whole seconds.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{RECORD_PREFIX}{}", at.timestamp()))
    }

    /// `record_<seconds>_<token>`.
    #[must_use]
    pub fn unique(at: DateTime<Utc>, token: &str) -> Self {
        Self(format!("{RECORD_PREFIX}{}_{token}", at.timestamp()))
    }

    /// Recovers the identifier from a record file name, if it has the
    /// record extension.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        if !is_record_file_name(name) {
            return None;
        }
        let stem = &name[..name.len() - RECORD_EXTENSION.len() - 1];
        Some(Self(stem.to_string()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The storage key: `<id>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{RECORD_EXTENSION}", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True if `name` has a `.json` extension.
///
/// A bare `.json` is a hidden file with no extension and does not count.
#[must_use]
pub fn is_record_file_name(name: &str) -> bool {
    Path::new(name).extension().is_some_and(|ext| ext == RECORD_EXTENSION)
}

/// A record read back from a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// File name within the collection directory.
    pub file_name: String,
    /// Raw file contents.
    pub content: String,
}

impl Record {
    /// The record's identifier, derived from its file name.
    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        RecordId::from_file_name(&self.file_name)
    }
}
