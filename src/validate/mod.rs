//! Optional content validation applied before insert.
//!
//! The store treats content as opaque text. Validation is a separate layer
//! the insert command runs first, so a rejected payload never touches disk.

use crate::error::{Error, Result};

/// Checks an insert payload before it is stored.
pub trait ContentValidator {
    /// Returns `Ok(())` if `content` is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] describing why it was rejected.
    fn validate(&self, content: &str) -> Result<()>;
}

/// Which validator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidatorKind {
    /// Accept everything.
    #[default]
    None,
    /// Require a well-formed JSON document.
    Json,
}

impl ValidatorKind {
    /// Builds the validator this kind names.
    #[must_use]
    pub fn build(self) -> Box<dyn ContentValidator> {
        match self {
            Self::None => Box::new(AcceptAll),
            Self::Json => Box::new(JsonValidator),
        }
    }
}

/// Accepts any content, including the empty string.
pub struct AcceptAll;

impl ContentValidator for AcceptAll {
    fn validate(&self, _content: &str) -> Result<()> {
        Ok(())
    }
}

/// Accepts content that parses as a single JSON value.
pub struct JsonValidator;

impl ContentValidator for JsonValidator {
    fn validate(&self, content: &str) -> Result<()> {
        serde_json::from_str::<serde_json::Value>(content)
            .map(|_| ())
            .map_err(|e| Error::InvalidContent { reason: format!("not valid JSON: {e}") })
    }
}
