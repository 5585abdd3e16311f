//! Filesystem port for directory and file I/O.

use std::path::Path;

/// The kind of a directory entry, with symlinks already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else: device nodes, sockets, dangling symlinks.
    Other,
}

/// A single entry returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The entry's file name (final path segment).
    pub name: String,
    /// What the entry is.
    pub kind: EntryKind,
}

impl DirEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// An exclusive lock held until dropped.
///
/// Adapters put whatever releases the lock into the guard; dropping the
/// `FileLock` drops the guard.
pub struct FileLock {
    _guard: Option<Box<dyn Send + Sync>>,
}

impl FileLock {
    /// Wraps an adapter-specific guard.
    #[must_use]
    pub fn new(guard: Box<dyn Send + Sync>) -> Self {
        Self { _guard: Some(guard) }
    }

    /// A lock that guards nothing, for adapters without real locking.
    #[must_use]
    pub fn noop() -> Self {
        Self { _guard: None }
    }
}

/// Provides filesystem access for the record store.
///
/// Abstracting the filesystem lets the store be tested without touching the
/// real disk and lets tests inject per-file failures.
pub trait FileSystem: Send + Sync {
    /// Creates a directory and all missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment cannot be created or a segment exists
    /// as a non-directory.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes `contents` to a file, creating it or truncating an existing one.
    ///
    /// Parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Like [`FileSystem::write`], but flushes the data to stable storage
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, written, or synced.
    fn write_synced(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Renames `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Lists the entries of a directory in the order the platform yields them.
    ///
    /// No sorting is applied. Entries whose names are not valid UTF-8 are
    /// omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>>;

    /// Blocks until an exclusive lock on `path` is acquired, creating the
    /// lock file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be opened or locked.
    fn lock_exclusive(&self, path: &Path)
        -> Result<FileLock, Box<dyn std::error::Error + Send + Sync>>;
}
