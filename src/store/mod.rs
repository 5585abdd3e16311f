//! Record store: one file per record, one directory per collection.
//!
//! All I/O goes through the `FileSystem` port on the [`ServiceContext`].
//! Directory layout:
//!
//! ```text
//! <root>/
//!   └── <collection>/
//!         ├── record_1700000000.json
//!         ├── record_1700000042.json
//!         └── .docstore.lock        (only when the writer lock is enabled)
//! ```

mod collection;
mod list;
mod record;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use collection::Collection;
pub use list::Records;
pub use record::{is_record_file_name, IdScheme, Record, RecordId, RECORD_EXTENSION, RECORD_PREFIX};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::filesystem::FileLock;

/// Name of the per-collection lock file.
pub const LOCK_FILE_NAME: &str = ".docstore.lock";

/// How insert puts bytes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    /// Truncate-and-write the record file in place. A failed write can leave
    /// a truncated file, and concurrent readers can see partial content.
    #[default]
    Direct,
    /// Write and sync a hidden temporary file, then rename it over the
    /// record file.
    Atomic,
}

/// Outcome of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    /// Identifier assigned to the record.
    pub id: RecordId,
    /// Path of the record file written.
    pub path: PathBuf,
}

/// Inserts and lists records in collections.
pub struct RecordStore<'a> {
    ctx: &'a ServiceContext,
    id_scheme: IdScheme,
    publish: PublishMode,
    lock: bool,
}

impl<'a> RecordStore<'a> {
    /// Creates a store with legacy behavior: timestamp ids, direct writes,
    /// no lock.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx, id_scheme: IdScheme::Timestamp, publish: PublishMode::Direct, lock: false }
    }

    /// Creates a store using the options in `config`.
    #[must_use]
    pub fn from_config(ctx: &'a ServiceContext, config: &Config) -> Self {
        Self::new(ctx).id_scheme(config.id_scheme).publish(config.publish).lock(config.lock)
    }

    /// Sets the identity scheme.
    #[must_use]
    pub fn id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    /// Sets the publish mode.
    #[must_use]
    pub fn publish(mut self, mode: PublishMode) -> Self {
        self.publish = mode;
        self
    }

    /// Enables or disables the per-collection writer lock.
    #[must_use]
    pub fn lock(mut self, enabled: bool) -> Self {
        self.lock = enabled;
        self
    }

    /// Writes `content` verbatim as a new record in `collection`.
    ///
    /// Under [`IdScheme::Timestamp`] an existing record with the same
    /// identifier is overwritten without warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`] if the lock, temporary, or record file
    /// cannot be opened or written.
    pub fn insert(&self, collection: &Collection, content: &str) -> Result<Inserted> {
        let _lock = if self.lock { Some(self.acquire_lock(collection.dir())?) } else { None };

        let id = self.next_id();
        let path = collection.dir().join(id.file_name());
        match self.publish {
            PublishMode::Direct => self
                .ctx
                .fs
                .write(&path, content)
                .map_err(|source| Error::WriteFailed { path: path.clone(), source })?,
            PublishMode::Atomic => self.publish_atomic(collection.dir(), &path, content)?,
        }

        info!(
            collection = collection.name(),
            record = %id,
            path = %path.display(),
            bytes = content.len(),
            "record inserted"
        );
        Ok(Inserted { id, path })
    }

    /// Lists every readable record in `collection`.
    ///
    /// The directory is enumerated eagerly; file contents are read lazily as
    /// the returned iterator advances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryUnreadable`] if the directory cannot be
    /// enumerated. Individual unreadable files are skipped, not errors.
    pub fn list(&self, collection: &Collection) -> Result<Records<'a>> {
        let dir = collection.dir().to_path_buf();
        let entries = self
            .ctx
            .fs
            .list_dir(&dir)
            .map_err(|source| Error::DirectoryUnreadable { path: dir.clone(), source })?;
        tracing::debug!(collection = collection.name(), entries = entries.len(), "listing");
        Ok(Records::new(self.ctx.fs.as_ref(), dir, entries))
    }

    fn next_id(&self) -> RecordId {
        let now = self.ctx.clock.now();
        match self.id_scheme {
            IdScheme::Timestamp => RecordId::from_timestamp(now),
            IdScheme::Unique => RecordId::unique(now, &self.ctx.id_gen.generate_id()),
        }
    }

    fn acquire_lock(&self, dir: &Path) -> Result<FileLock> {
        let path = dir.join(LOCK_FILE_NAME);
        self.ctx.fs.lock_exclusive(&path).map_err(|source| Error::WriteFailed { path, source })
    }

    fn publish_atomic(&self, dir: &Path, path: &Path, content: &str) -> Result<()> {
        let file_name = path.file_name().map_or_else(
            || "record".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        let temp = dir.join(format!(".{file_name}.{}.tmp", self.ctx.id_gen.generate_id()));

        if let Err(source) = self.ctx.fs.write_synced(&temp, content) {
            self.discard_temp(&temp);
            return Err(Error::WriteFailed { path: temp, source });
        }
        if let Err(source) = self.ctx.fs.rename(&temp, path) {
            self.discard_temp(&temp);
            return Err(Error::WriteFailed { path: path.to_path_buf(), source });
        }
        Ok(())
    }

    fn discard_temp(&self, temp: &Path) {
        if let Err(e) = self.ctx.fs.remove_file(temp) {
            warn!(path = %temp.display(), error = %e, "failed to remove temporary file");
        }
    }
}
