//! Merge commit assembly.

use std::collections::BTreeMap;

use repofs_store::{Blob, PathEntryMap};
use repofs_types::CommitRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MergeConfig;
use crate::conflict::Resolution;
use crate::error::MergeResult;
use crate::solve::solved_entries_with;
use crate::tree_conflict::TreeConflict;

/// Who made a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Everything a driver needs to write a commit.
///
/// Entries in `tree_entries` without a hash belong to paths in `blobs`; the
/// driver writes each blob and substitutes its hash before writing the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBuilder {
    parents: Vec<CommitRef>,
    author: Author,
    message: String,
    blobs: BTreeMap<String, Blob>,
    tree_entries: PathEntryMap,
}

impl CommitBuilder {
    pub fn new(
        parents: Vec<CommitRef>,
        author: Author,
        message: impl Into<String>,
        blobs: BTreeMap<String, Blob>,
        tree_entries: PathEntryMap,
    ) -> Self {
        Self {
            parents,
            author,
            message: message.into(),
            blobs,
            tree_entries,
        }
    }

    /// Parents in order; the first is the branch being merged into.
    pub fn parents(&self) -> &[CommitRef] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// New content keyed by path.
    pub fn blobs(&self) -> &BTreeMap<String, Blob> {
        &self.blobs
    }

    pub fn tree_entries(&self) -> &PathEntryMap {
        &self.tree_entries
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Assemble a merge commit with the default config.
///
/// See [`merge_commit_with`].
pub fn merge_commit(
    tree_conflict: &TreeConflict,
    parents: Vec<CommitRef>,
    author: Author,
) -> MergeResult<CommitBuilder> {
    merge_commit_with(tree_conflict, parents, author, &MergeConfig::default())
}

/// Assemble a merge commit from a resolved `tree_conflict`.
///
/// Nothing is hashed or written here. Every `Content` resolution becomes a
/// blob under its path, and the tree entries are the solved entries,
/// placeholders included.
pub fn merge_commit_with(
    tree_conflict: &TreeConflict,
    parents: Vec<CommitRef>,
    author: Author,
    config: &MergeConfig,
) -> MergeResult<CommitBuilder> {
    let tree_entries = solved_entries_with(tree_conflict, config)?;

    let blobs: BTreeMap<String, Blob> = tree_conflict
        .conflicts()
        .iter()
        .filter_map(|(path, conflict)| match conflict.resolution() {
            Some(Resolution::Content(text)) => Some((path.clone(), Blob::from_text(text.as_str()))),
            _ => None,
        })
        .collect();

    debug!(
        parents = parents.len(),
        blobs = blobs.len(),
        entries = tree_entries.len(),
        "assembled merge commit"
    );

    Ok(CommitBuilder::new(
        parents,
        author,
        config.default_message.clone(),
        blobs,
        tree_entries,
    ))
}
