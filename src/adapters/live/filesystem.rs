//! Live filesystem adapter using `std::fs` and `fs2` advisory locks.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tracing::{debug, warn};

use crate::ports::filesystem::{DirEntry, EntryKind, FileLock, FileSystem};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

/// Holds the locked file; unlocks on drop.
struct LockedFile(File);

impl Drop for LockedFile {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.0) {
            debug!(error = %e, "failed to release lock explicitly; it is released on close");
        }
    }
}

impl FileSystem for LiveFileSystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::write(path, contents)?)
    }

    fn write_synced(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut file = File::create(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::rename(from, to)?)
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::remove_file(path)?)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let raw_name = entry.file_name();
            let Some(name) = raw_name.to_str().map(String::from) else {
                if Path::new(&raw_name).extension().is_some_and(|ext| ext == "json") {
                    warn!(path = %entry.path().display(), "skipping record with non-UTF-8 name");
                } else {
                    debug!(entry = ?raw_name, "skipping entry with non-UTF-8 name");
                }
                continue;
            };
            // Follow symlinks so a link to a regular file counts as a file.
            let kind = match std::fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                _ => EntryKind::Other,
            };
            entries.push(DirEntry { name, kind });
        }
        Ok(entries)
    }

    fn lock_exclusive(
        &self,
        path: &Path,
    ) -> Result<FileLock, Box<dyn std::error::Error + Send + Sync>> {
        let file = OpenOptions::new().read(true).write(true).create(true).truncate(false).open(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(FileLock::new(Box::new(LockedFile(file))))
    }
}
