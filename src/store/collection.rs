//! Collection resolution: name to directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// A collection whose directory is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: String,
    dir: PathBuf,
}

impl Collection {
    /// Ensures `<root>/<name>` exists, creating missing segments, and
    /// returns a handle to it.
    ///
    /// The name is used as a path segment without interpretation, so
    /// names containing `..` resolve outside `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for an empty name, and
    /// [`Error::StorageUnavailable`] if the directory cannot be created.
    pub fn resolve(ctx: &ServiceContext, root: &Path, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::usage("Error: collection name must not be empty."));
        }
        let dir = root.join(name);
        ctx.fs
            .create_dir_all(&dir)
            .map_err(|source| Error::StorageUnavailable { path: dir.clone(), source })?;
        debug!(collection = name, dir = %dir.display(), "collection resolved");
        Ok(Self { name: name.to_string(), dir })
    }

    /// The collection name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
