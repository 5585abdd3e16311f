//! Runtime configuration read from the environment.
//!
//! With nothing set, every option takes the value that reproduces the
//! legacy behavior: collections relative to the working directory,
//! timestamp-only record names, direct writes, no lock, no validation.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::store::{IdScheme, PublishMode};
use crate::validate::ValidatorKind;

/// Storage root; collections are resolved against it.
pub const ROOT_VAR: &str = "DOCSTORE_ROOT";
/// Identity scheme: `timestamp` or `unique`.
pub const ID_SCHEME_VAR: &str = "DOCSTORE_ID_SCHEME";
/// Publish mode: `direct` or `atomic`.
pub const PUBLISH_VAR: &str = "DOCSTORE_PUBLISH";
/// Writer lock toggle.
pub const LOCK_VAR: &str = "DOCSTORE_LOCK";
/// Content validator: `none` or `json`.
pub const VALIDATE_VAR: &str = "DOCSTORE_VALIDATE";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory collections live under. Empty means the working directory.
    pub root: PathBuf,
    /// How record identifiers are derived.
    pub id_scheme: IdScheme,
    /// How insert puts bytes on disk.
    pub publish: PublishMode,
    /// Whether insert takes the per-collection writer lock.
    pub lock: bool,
    /// Which validator the insert command applies.
    pub validator: ValidatorKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            id_scheme: IdScheme::Timestamp,
            publish: PublishMode::Direct,
            lock: false,
            validator: ValidatorKind::None,
        }
    }
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// Call [`load_dotenv`] first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable holds an unrecognized value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a value is unrecognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root) = lookup(ROOT_VAR).filter(|v| !v.trim().is_empty()) {
            config.root = PathBuf::from(root);
        }
        if let Some(value) = lookup(ID_SCHEME_VAR) {
            config.id_scheme = match normalize(&value).as_str() {
                "timestamp" | "legacy" => IdScheme::Timestamp,
                "unique" => IdScheme::Unique,
                _ => return Err(invalid(ID_SCHEME_VAR, value, "timestamp or unique")),
            };
        }
        if let Some(value) = lookup(PUBLISH_VAR) {
            config.publish = match normalize(&value).as_str() {
                "direct" => PublishMode::Direct,
                "atomic" => PublishMode::Atomic,
                _ => return Err(invalid(PUBLISH_VAR, value, "direct or atomic")),
            };
        }
        if let Some(value) = lookup(LOCK_VAR) {
            config.lock = match normalize(&value).as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(invalid(LOCK_VAR, value, "a boolean")),
            };
        }
        if let Some(value) = lookup(VALIDATE_VAR) {
            config.validator = match normalize(&value).as_str() {
                "none" | "" => ValidatorKind::None,
                "json" => ValidatorKind::Json,
                _ => return Err(invalid(VALIDATE_VAR, value, "none or json")),
            };
        }

        Ok(config)
    }
}

/// Loads a `.env` file from the working directory if one exists.
///
/// Variables already present in the environment win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

fn invalid(key: &'static str, value: String, expected: &'static str) -> Error {
    Error::Config { key, value, expected }
}
