//! Error types for store and command failures.
//!
//! Every failure the program can report is one [`Error`] variant. I/O
//! variants carry the path involved and the underlying cause. Unreadable
//! records during a listing are not errors: they are skipped with a warning.

use std::path::PathBuf;

/// Boxed source error as returned by the port traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Store and command errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed invocation: missing arguments, missing insert payload,
    /// unknown operation, or an empty collection name.
    #[error("{0}")]
    Usage(String),

    /// The collection directory could not be created or accessed.
    #[error("Error creating/checking directory {}: {source}", path.display())]
    StorageUnavailable {
        /// Collection directory.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// A record file could not be opened or written.
    #[error("Error writing file {}: {source}", path.display())]
    WriteFailed {
        /// Record (or lock / temporary) file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// The collection directory could not be enumerated.
    #[error("Error reading directory contents {}: {source}", path.display())]
    DirectoryUnreadable {
        /// Collection directory.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// The content validator rejected the insert payload.
    #[error("Error: invalid content: {reason}")]
    InvalidContent {
        /// Validator message.
        reason: String,
    },

    /// A configuration value could not be understood.
    #[error("Error: invalid value {value:?} for {key}: expected {expected}")]
    Config {
        /// Environment variable name.
        key: &'static str,
        /// Value found.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },

    /// Command output could not be written.
    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Creates a usage error from a message.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
