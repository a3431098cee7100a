//! Error types for the merge crate.

/// Errors raised by resolution and reconstruction.
///
/// Diffing and conflict detection cannot fail. These errors only signal a
/// caller bug and should not be retried.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// A conflict names a path that exists in none of the three trees.
    #[error("invariant violation: conflict at {path} is absent from parent, base and head")]
    InvariantViolation { path: String },

    /// Merge configuration could not be parsed.
    #[error("invalid merge config: {0}")]
    Config(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
