use std::collections::BTreeMap;

use repofs_types::ObjectId;
use serde::{Deserialize, Serialize};

/// Flat mapping from path to the entry stored there.
///
/// A missing key means the path does not exist in that tree. `BTreeMap`
/// keeps iteration deterministic, but no operation depends on order.
pub type PathEntryMap = BTreeMap<String, TreeEntry>;

/// The file found at one path of a tree.
///
/// Entries compare by hash only. A hash of `None` marks content that was
/// resolved inline during a merge and has not been written as a blob yet;
/// the persistence layer fills it in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEntry {
    hash: Option<ObjectId>,
}

impl TreeEntry {
    /// Entry pointing at stored content.
    pub fn new(hash: ObjectId) -> Self {
        Self { hash: Some(hash) }
    }

    /// Placeholder for content whose blob has not been persisted.
    pub fn unassigned() -> Self {
        Self { hash: None }
    }

    /// Content hash, or `None` for a placeholder.
    pub fn hash(&self) -> Option<ObjectId> {
        self.hash
    }

    /// Whether the entry points at stored content.
    pub fn is_assigned(&self) -> bool {
        self.hash.is_some()
    }
}

impl From<ObjectId> for TreeEntry {
    fn from(hash: ObjectId) -> Self {
        Self::new(hash)
    }
}
