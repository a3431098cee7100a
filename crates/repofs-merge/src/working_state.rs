//! Snapshots of a branch or commit.

use std::collections::BTreeMap;

use repofs_store::{Blob, PathEntryMap};
use repofs_types::CommitRef;
use serde::{Deserialize, Serialize};

/// A pending, uncommitted change to one path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    Create(Blob),
    Update(Blob),
    Remove,
}

/// Uncommitted changes keyed by path.
pub type ChangeSet = BTreeMap<String, Change>;

/// Tree of a commit plus any local changes made on top of it.
///
/// The merge engine reads `head` and `entries` only. `changes` rides along
/// so drivers can hand back the full state they fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingState {
    head: CommitRef,
    entries: PathEntryMap,
    changes: ChangeSet,
}

impl WorkingState {
    /// A clean working state for the tree of `head`.
    pub fn with_tree(head: CommitRef, entries: PathEntryMap) -> Self {
        Self {
            head,
            entries,
            changes: ChangeSet::new(),
        }
    }

    /// A copy of this state carrying `changes` instead of its own.
    pub fn with_changes(&self, changes: ChangeSet) -> Self {
        Self {
            head: self.head.clone(),
            entries: self.entries.clone(),
            changes,
        }
    }

    pub fn head(&self) -> &CommitRef {
        &self.head
    }

    pub fn entries(&self) -> &PathEntryMap {
        &self.entries
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}
