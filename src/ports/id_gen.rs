//! ID generator port for producing unique tokens.

/// Generates unique identifier tokens.
///
/// Used by the `unique` identity scheme and for temporary file names during
/// atomic publish.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique token.
    ///
    /// Tokens must be usable inside a file name.
    fn generate_id(&self) -> String;
}
