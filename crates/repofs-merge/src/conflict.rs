//! Per-path conflicts and their resolutions.

use std::collections::BTreeMap;

use repofs_types::ObjectId;
use serde::{Deserialize, Serialize};

/// Conflicts keyed by path.
pub type ConflictMap = BTreeMap<String, Conflict>;

/// How a conflicting path should end up in the merged tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Take the base side, including its deletion.
    #[default]
    KeepBase,
    /// Take the head side, including its deletion.
    KeepHead,
    /// Replace the path with new text content.
    Content(String),
}

/// One path that both sides changed to different results.
///
/// A hash of `None` means the path does not exist on that side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conflict {
    parent_hash: Option<ObjectId>,
    base_hash: Option<ObjectId>,
    head_hash: Option<ObjectId>,
    resolution: Option<Resolution>,
}

impl Conflict {
    /// An unresolved conflict.
    pub fn new(
        parent_hash: Option<ObjectId>,
        base_hash: Option<ObjectId>,
        head_hash: Option<ObjectId>,
    ) -> Self {
        Self {
            parent_hash,
            base_hash,
            head_hash,
            resolution: None,
        }
    }

    pub fn parent_hash(&self) -> Option<ObjectId> {
        self.parent_hash
    }

    pub fn base_hash(&self) -> Option<ObjectId> {
        self.base_hash
    }

    pub fn head_hash(&self) -> Option<ObjectId> {
        self.head_hash
    }

    /// The explicit resolution, if any.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// The resolution that applies when merging: explicit or `KeepBase`.
    pub fn effective_resolution(&self) -> Resolution {
        self.resolution.clone().unwrap_or_default()
    }

    pub fn is_solved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Copy of this conflict with `resolution` applied.
    pub fn solve(&self, resolution: Resolution) -> Self {
        Self {
            resolution: Some(resolution),
            ..self.clone()
        }
    }

    pub fn keep_base(&self) -> Self {
        self.solve(Resolution::KeepBase)
    }

    pub fn keep_head(&self) -> Self {
        self.solve(Resolution::KeepHead)
    }

    pub fn solve_with_content(&self, text: impl Into<String>) -> Self {
        self.solve(Resolution::Content(text.into()))
    }

    /// Both sides added the path independently.
    pub fn is_both_added(&self) -> bool {
        self.parent_hash.is_none() && self.base_hash.is_some() && self.head_hash.is_some()
    }

    /// One side deleted the path while the other modified it.
    pub fn is_deleted_on_one_side(&self) -> bool {
        self.parent_hash.is_some() && (self.base_hash.is_none() != self.head_hash.is_none())
    }
}
