use repofs_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The object data is malformed or has an unexpected kind.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// A tree was built from an entry whose content was never hashed.
    #[error("entry at {path} has no content hash")]
    UnassignedEntry { path: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
