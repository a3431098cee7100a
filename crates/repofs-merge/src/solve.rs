//! Applying resolutions and rebuilding the merged tree.

use std::collections::BTreeSet;

use repofs_diff::diff_entries;
use repofs_store::{PathEntryMap, TreeEntry};
use tracing::{debug, warn};

use crate::config::MergeConfig;
use crate::conflict::{ConflictMap, Resolution};
use crate::error::MergeResult;
use crate::tree_conflict::TreeConflict;

/// Fold caller resolutions into `tree_conflict` with the default config.
///
/// See [`solve_tree_with`].
pub fn solve_tree(
    tree_conflict: &TreeConflict,
    resolutions: &ConflictMap,
) -> MergeResult<TreeConflict> {
    solve_tree_with(tree_conflict, resolutions, &MergeConfig::default())
}

/// Fold caller resolutions into `tree_conflict`.
///
/// Only the `resolution` of each supplied conflict is read. Every conflict
/// of `tree_conflict` comes out resolved: with the supplied resolution if
/// there is one, otherwise with [`Resolution::KeepBase`]. Resolutions for
/// paths outside the conflict set are logged and ignored.
pub fn solve_tree_with(
    tree_conflict: &TreeConflict,
    resolutions: &ConflictMap,
    config: &MergeConfig,
) -> MergeResult<TreeConflict> {
    if config.validate_conflicts {
        tree_conflict.validate()?;
    }

    for path in resolutions.keys() {
        if tree_conflict.get(path).is_none() {
            if config.warn_on_unknown_targets {
                warn!(%path, "ignoring resolution for path without conflict");
            } else {
                debug!(%path, "ignoring resolution for path without conflict");
            }
        }
    }

    let mut explicit = 0usize;
    let solved: ConflictMap = tree_conflict
        .conflicts()
        .iter()
        .map(|(path, conflict)| {
            let resolution = match resolutions.get(path).and_then(|c| c.resolution()) {
                Some(resolution) => {
                    explicit += 1;
                    resolution.clone()
                }
                None => Resolution::KeepBase,
            };
            (path.clone(), conflict.solve(resolution))
        })
        .collect();

    debug!(
        conflicts = solved.len(),
        explicit,
        defaulted = solved.len() - explicit,
        "applied resolutions"
    );
    Ok(tree_conflict.with_conflicts(solved))
}

/// Rebuild the merged tree with the default config.
///
/// See [`solved_entries_with`].
pub fn solved_entries(tree_conflict: &TreeConflict) -> MergeResult<PathEntryMap> {
    solved_entries_with(tree_conflict, &MergeConfig::default())
}

/// Rebuild the merged tree from a resolved `tree_conflict`.
///
/// Conflicting paths follow their resolution (unresolved ones keep base).
/// `Content` resolutions yield a placeholder entry with no hash. Every other
/// path takes the value of the side that changed it, or the ancestor's if
/// neither did. Paths that resolve to a deletion are left out.
pub fn solved_entries_with(
    tree_conflict: &TreeConflict,
    config: &MergeConfig,
) -> MergeResult<PathEntryMap> {
    if config.validate_conflicts {
        tree_conflict.validate()?;
    }

    let parent = tree_conflict.parent().entries();
    let base = tree_conflict.base().entries();
    let head = tree_conflict.head().entries();
    let base_diff = diff_entries(parent, base);
    let head_diff = diff_entries(parent, head);

    let paths: BTreeSet<&String> = parent.keys().chain(base.keys()).chain(head.keys()).collect();

    let solved: PathEntryMap = paths
        .into_iter()
        .filter_map(|path| {
            let entry = match tree_conflict.get(path) {
                Some(conflict) => match conflict.effective_resolution() {
                    Resolution::KeepBase => base.get(path).copied(),
                    Resolution::KeepHead => head.get(path).copied(),
                    Resolution::Content(_) => Some(TreeEntry::unassigned()),
                },
                None => match (base_diff.get(path), head_diff.get(path)) {
                    (Some(change), _) | (None, Some(change)) => change.entry(),
                    (None, None) => parent.get(path).copied(),
                },
            };
            entry.map(|e| (path.clone(), e))
        })
        .collect();

    Ok(solved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::Conflict;
    use crate::error::MergeError;
    use crate::fixtures::{self, entries, h, state};
    use crate::working_state::WorkingState;
    use proptest::prelude::*;
    use repofs_types::{CommitRef, ObjectId};

    #[test]
    fn merges_resolutions_defaulting_to_base() {
        let tc = fixtures::tree_conflict();
        let solved = solve_tree(&tc, &fixtures::caller_resolutions()).unwrap();

        assert_eq!(solved.parent(), tc.parent());
        assert_eq!(solved.base(), tc.base());
        assert_eq!(solved.head(), tc.head());

        let mut expected = fixtures::caller_resolutions();
        let keep_base = expected["bothAddedDifferent"].keep_base();
        expected.insert("bothAddedDifferent".into(), keep_base);
        assert_eq!(solved.conflicts(), &expected);
    }

    #[test]
    fn empty_resolutions_keep_base_everywhere() {
        let tc = fixtures::tree_conflict();
        let solved = solve_tree(&tc, &ConflictMap::new()).unwrap();
        assert_eq!(solved.len(), tc.len());
        assert!(solved
            .conflicts()
            .values()
            .all(|c| c.resolution() == Some(&Resolution::KeepBase)));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let tc = fixtures::tree_conflict();
        let mut resolutions = ConflictMap::new();
        resolutions.insert(
            "unchanged".into(),
            Conflict::new(h("a"), h("b"), h("c")).keep_head(),
        );

        let solved = solve_tree(&tc, &resolutions).unwrap();
        assert!(solved.get("unchanged").is_none());
        assert!(solved.conflicts().keys().eq(tc.conflicts().keys()));
    }

    #[test]
    fn unknown_targets_are_ignored_quietly_when_configured() {
        let config = MergeConfig {
            warn_on_unknown_targets: false,
            ..MergeConfig::default()
        };
        let mut resolutions = ConflictMap::new();
        resolutions.insert("elsewhere".into(), Conflict::new(None, h("a"), h("b")).keep_head());

        let solved = solve_tree_with(&fixtures::tree_conflict(), &resolutions, &config).unwrap();
        assert_eq!(solved.len(), 3);
    }

    #[test]
    fn solving_twice_is_idempotent() {
        let tc = fixtures::tree_conflict();
        let resolutions = fixtures::caller_resolutions();
        let once = solve_tree(&tc, &resolutions).unwrap();
        let twice = solve_tree(&once, &resolutions).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_conflict_is_rejected() {
        let tc = fixtures::tree_conflict();
        let mut conflicts = tc.conflicts().clone();
        conflicts.insert("ghost".into(), Conflict::new(h("p"), h("b"), None));
        let malformed = tc.with_conflicts(conflicts);

        let expected = MergeError::InvariantViolation { path: "ghost".into() };
        assert_eq!(solve_tree(&malformed, &ConflictMap::new()).unwrap_err(), expected);
        assert_eq!(solved_entries(&malformed).unwrap_err(), expected);
    }

    #[test]
    fn validation_can_be_disabled() {
        let tc = fixtures::tree_conflict();
        let mut conflicts = tc.conflicts().clone();
        conflicts.insert("ghost".into(), Conflict::new(h("p"), h("b"), None));
        let config = MergeConfig {
            validate_conflicts: false,
            ..MergeConfig::default()
        };

        let entries = solved_entries_with(&tc.with_conflicts(conflicts), &config).unwrap();
        assert!(!entries.contains_key("ghost"));
    }

    #[test]
    fn generates_the_solved_tree_entries() {
        let solved = solve_tree(&fixtures::tree_conflict(), &fixtures::caller_resolutions()).unwrap();
        let result = solved_entries(&solved).unwrap();

        assert_eq!(result, fixtures::expected_solved_entries());
        assert!(!result.contains_key("bothDeleted"));
        assert!(!result.contains_key("deletedBase"));
    }

    #[test]
    fn unresolved_tree_rebuilds_with_base_choices() {
        let tc = fixtures::tree_conflict();
        let result = solved_entries(&tc).unwrap();
        let solved = solved_entries(&solve_tree(&tc, &ConflictMap::new()).unwrap()).unwrap();
        assert_eq!(result, solved);
        // deletedModified was deleted on base.
        assert!(!result.contains_key("deletedModified"));
    }

    #[test]
    fn keep_head_restores_path_deleted_on_base() {
        let parent = state("p", &[("a", "x")]);
        let base = WorkingState::with_tree(CommitRef::new("b").unwrap(), PathEntryMap::new());
        let head = state("h", &[("a", "y")]);
        let tc = TreeConflict::from_states(parent, base, head);

        let mut resolutions = ConflictMap::new();
        resolutions.insert("a".into(), tc.conflicts()["a"].keep_head());
        let result = solved_entries(&solve_tree(&tc, &resolutions).unwrap()).unwrap();
        assert_eq!(result, entries(&[("a", "y")]));
    }

    fn arb_state(name: &'static str) -> impl Strategy<Value = WorkingState> {
        prop::collection::btree_map("[a-e]", 0u8..3, 0..6).prop_map(move |m| {
            let entries = m
                .into_iter()
                .map(|(path, h)| (path, TreeEntry::new(ObjectId::from_hash([h; 32]))))
                .collect();
            WorkingState::with_tree(CommitRef::new(name).unwrap(), entries)
        })
    }

    proptest! {
        #[test]
        fn one_sided_changes_are_never_lost(
            parent in arb_state("parent"),
            base in arb_state("base"),
            head in arb_state("head"),
        ) {
            let tc = TreeConflict::from_states(parent.clone(), base.clone(), head.clone());
            let merged = solved_entries(&tc).unwrap();
            let base_diff = diff_entries(parent.entries(), base.entries());
            let head_diff = diff_entries(parent.entries(), head.entries());

            for path in parent.entries().keys().chain(base.entries().keys()).chain(head.entries().keys()) {
                if tc.get(path).is_some() {
                    prop_assert_eq!(merged.get(path), base.entries().get(path));
                } else if base_diff.contains(path) {
                    prop_assert_eq!(merged.get(path), base.entries().get(path));
                } else if head_diff.contains(path) {
                    prop_assert_eq!(merged.get(path), head.entries().get(path));
                } else {
                    prop_assert_eq!(merged.get(path), parent.entries().get(path));
                }
            }
        }

        #[test]
        fn solve_is_idempotent_and_total(
            parent in arb_state("parent"),
            base in arb_state("base"),
            head in arb_state("head"),
            pick_head in any::<bool>(),
        ) {
            let tc = TreeConflict::from_states(parent, base, head);
            let resolutions: ConflictMap = tc
                .conflicts()
                .iter()
                .take(1)
                .map(|(p, c)| (p.clone(), if pick_head { c.keep_head() } else { c.solve_with_content("x") }))
                .collect();

            let once = solve_tree(&tc, &resolutions).unwrap();
            let twice = solve_tree(&once, &resolutions).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.conflicts().values().all(|c| c.is_solved()));
            prop_assert_eq!(solved_entries(&once).unwrap(), solved_entries(&twice).unwrap());
        }
    }
}
