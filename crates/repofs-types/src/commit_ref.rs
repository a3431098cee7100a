//! Opaque commit references.
//!
//! A driver hands out whatever string identifies a commit on its backend
//! (a hex sha for git-compatible hosts). The core only orders and compares
//! them; it never resolves one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::object::ObjectId;

/// Reference to a commit, e.g. `"3f2a..."` or a symbolic name during tests.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitRef(String);

impl CommitRef {
    /// Build a reference from any non-empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeError::EmptyCommitRef);
        }
        Ok(Self(value))
    }

    /// Reference a commit by the content hash of its record.
    pub fn from_object_id(id: &ObjectId) -> Self {
        Self(id.to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
