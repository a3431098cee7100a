use repofs_types::{CommitRef, ObjectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch already exists: {0}")]
    BranchExists(String),

    #[error("commit not found: {0}")]
    CommitNotFound(CommitRef),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// A merge commit still has a placeholder entry with no blob to fill it.
    #[error("entry at {path} has no content hash and no blob")]
    UnassignedEntry { path: String },

    #[error("invalid reference: {0}")]
    InvalidRef(#[from] repofs_types::TypeError),

    #[error("store error: {0}")]
    Store(#[from] repofs_store::StoreError),

    #[error("merge error: {0}")]
    Merge(#[from] repofs_merge::MergeError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type DriverResult<T> = Result<T, DriverError>;
