//! Lazy enumeration of the records in a collection.

use std::path::PathBuf;
use std::vec;

use tracing::{debug, warn};

use crate::ports::filesystem::{DirEntry, EntryKind, FileSystem};
use crate::store::record::{is_record_file_name, Record};

/// Iterator over the readable records of one collection.
///
/// Entries come out in the order the directory listing produced them.
/// File contents are read only when the iterator reaches them; a file that
/// cannot be read is logged and skipped.
pub struct Records<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
    entries: vec::IntoIter<DirEntry>,
    skipped: usize,
}

impl<'a> Records<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, dir: PathBuf, entries: Vec<DirEntry>) -> Self {
        Self { fs, dir, entries: entries.into_iter(), skipped: 0 }
    }

    /// Number of record files skipped so far because they could not be read.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for entry in self.entries.by_ref() {
            if entry.kind != EntryKind::File || !is_record_file_name(&entry.name) {
                continue;
            }
            let path = self.dir.join(&entry.name);
            match self.fs.read_to_string(&path) {
                Ok(content) => {
                    let record = Record { file_name: entry.name, content };
                    debug!(record = ?record.id(), bytes = record.content.len(), "record read");
                    return Some(record);
                }
                Err(e) => {
                    self.skipped += 1;
                    warn!(path = %path.display(), error = %e, "Error opening file, skipping");
                }
            }
        }
        None
    }
}
