//! Path-level diff between two entry maps.
//!
//! Only presence and hash are compared. A path whose hash is unchanged, or
//! that is missing from both maps, never shows up in the result.

use std::collections::btree_map;
use std::collections::BTreeMap;

use repofs_store::{PathEntryMap, TreeEntry};
use serde::{Deserialize, Serialize};

/// What the target map holds at a changed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryChange {
    /// The path was added or its hash changed.
    Changed(TreeEntry),
    /// The path exists in the source but not in the target.
    Deleted,
}

impl EntryChange {
    /// The entry left at the path, or `None` for a deletion.
    pub fn entry(&self) -> Option<TreeEntry> {
        match self {
            Self::Changed(entry) => Some(*entry),
            Self::Deleted => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// The set of paths that differ between two entry maps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDiff {
    changes: BTreeMap<String, EntryChange>,
}

impl EntryDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&EntryChange> {
        self.changes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.changes.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.changes.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, EntryChange> {
        self.changes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

impl FromIterator<(String, EntryChange)> for EntryDiff {
    fn from_iter<I: IntoIterator<Item = (String, EntryChange)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EntryDiff {
    type Item = (&'a String, &'a EntryChange);
    type IntoIter = btree_map::Iter<'a, String, EntryChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Diff `from` against `to`.
///
/// - in `from` only: [`EntryChange::Deleted`]
/// - in `to` only, or in both with different hashes: `to`'s entry
/// - in both with the same hash: omitted
pub fn diff_entries(from: &PathEntryMap, to: &PathEntryMap) -> EntryDiff {
    let mut changes = BTreeMap::new();

    for (path, old_entry) in from {
        match to.get(path) {
            Some(new_entry) if new_entry != old_entry => {
                changes.insert(path.clone(), EntryChange::Changed(*new_entry));
            }
            Some(_) => {}
            None => {
                changes.insert(path.clone(), EntryChange::Deleted);
            }
        }
    }

    for (path, new_entry) in to {
        if !from.contains_key(path) {
            changes.insert(path.clone(), EntryChange::Changed(*new_entry));
        }
    }

    EntryDiff { changes }
}
