//! Shared test data: the ancestor/base/head trees of a merge that exercises
//! every add/modify/delete combination.

use repofs_store::{PathEntryMap, TreeEntry};
use repofs_types::{CommitRef, ObjectId};

use crate::conflict::{Conflict, ConflictMap};
use crate::tree_conflict::TreeConflict;
use crate::working_state::WorkingState;

pub(crate) fn h(content: &str) -> Option<ObjectId> {
    Some(ObjectId::from_bytes(content.as_bytes()))
}

pub(crate) fn entry(content: &str) -> TreeEntry {
    TreeEntry::new(ObjectId::from_bytes(content.as_bytes()))
}

pub(crate) fn entries(pairs: &[(&str, &str)]) -> PathEntryMap {
    pairs
        .iter()
        .map(|(path, content)| (path.to_string(), entry(content)))
        .collect()
}

pub(crate) fn state(head: &str, pairs: &[(&str, &str)]) -> WorkingState {
    WorkingState::with_tree(CommitRef::new(head).unwrap(), entries(pairs))
}

pub(crate) fn parent_state() -> WorkingState {
    state(
        "parentWK",
        &[
            ("bothDeleted", "bothDeleted"),
            ("bothModified", "bothModified-parent"),
            ("deletedBase", "deletedBase"),
            ("deletedModified", "deletedModified-parent"),
            ("modifiedBase", "modifiedBase-parent"),
            ("unchanged", "unchanged"),
        ],
    )
}

pub(crate) fn base_state() -> WorkingState {
    state(
        "baseWK",
        &[
            ("addedBase", "addedBase"),
            ("bothAddedDifferent", "bothAddedDifferent-base"),
            ("bothAddedSame", "bothAddedSame"),
            ("bothModified", "bothModified-base"),
            ("modifiedBase", "modifiedBase-base"),
            ("unchanged", "unchanged"),
        ],
    )
}

pub(crate) fn head_state() -> WorkingState {
    state(
        "headWK",
        &[
            ("bothAddedDifferent", "bothAddedDifferent-head"),
            ("bothAddedSame", "bothAddedSame"),
            ("bothModified", "bothModified-head"),
            ("deletedBase", "deletedBase"),
            ("deletedModified", "deletedModified-head"),
            ("modifiedBase", "modifiedBase-parent"),
            ("unchanged", "unchanged"),
        ],
    )
}

pub(crate) fn conflicts() -> ConflictMap {
    let mut conflicts = ConflictMap::new();
    conflicts.insert(
        "bothModified".into(),
        Conflict::new(h("bothModified-parent"), h("bothModified-base"), h("bothModified-head")),
    );
    conflicts.insert(
        "bothAddedDifferent".into(),
        Conflict::new(None, h("bothAddedDifferent-base"), h("bothAddedDifferent-head")),
    );
    conflicts.insert(
        "deletedModified".into(),
        Conflict::new(h("deletedModified-parent"), None, h("deletedModified-head")),
    );
    conflicts
}

pub(crate) fn tree_conflict() -> TreeConflict {
    TreeConflict::new(parent_state(), base_state(), head_state(), conflicts())
}

/// Resolutions as a caller would send them back: the full conflict map with
/// `bothModified` rewritten, `deletedModified` taken from head, and
/// `bothAddedDifferent` left untouched.
pub(crate) fn caller_resolutions() -> ConflictMap {
    let mut solved = conflicts();
    let both_modified = solved["bothModified"].solve_with_content("Solved content");
    let deleted_modified = solved["deletedModified"].keep_head();
    solved.insert("bothModified".into(), both_modified);
    solved.insert("deletedModified".into(), deleted_modified);
    solved
}

/// The merged tree once `caller_resolutions` is applied.
pub(crate) fn expected_solved_entries() -> PathEntryMap {
    let mut expected = entries(&[
        ("addedBase", "addedBase"),
        ("bothAddedDifferent", "bothAddedDifferent-base"),
        ("bothAddedSame", "bothAddedSame"),
        ("deletedModified", "deletedModified-head"),
        ("modifiedBase", "modifiedBase-base"),
        ("unchanged", "unchanged"),
    ]);
    expected.insert("bothModified".into(), TreeEntry::unassigned());
    expected
}
