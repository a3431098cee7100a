use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::compare::compare_trees;
use crate::conflict::{Conflict, ConflictMap};
use crate::error::{MergeError, MergeResult};
use crate::working_state::WorkingState;

/// A merge in progress: the ancestor, the two sides, and the conflicts
/// between them.
///
/// The three working states are shared, not copied, between successive
/// `TreeConflict` values; only `conflicts` changes as resolutions come in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConflict {
    parent: Arc<WorkingState>,
    base: Arc<WorkingState>,
    head: Arc<WorkingState>,
    conflicts: ConflictMap,
}

impl TreeConflict {
    /// Assemble a tree conflict from already computed conflicts.
    pub fn new(
        parent: impl Into<Arc<WorkingState>>,
        base: impl Into<Arc<WorkingState>>,
        head: impl Into<Arc<WorkingState>>,
        conflicts: ConflictMap,
    ) -> Self {
        Self {
            parent: parent.into(),
            base: base.into(),
            head: head.into(),
            conflicts,
        }
    }

    /// Compare `base` and `head` against their common ancestor `parent`.
    pub fn from_states(
        parent: impl Into<Arc<WorkingState>>,
        base: impl Into<Arc<WorkingState>>,
        head: impl Into<Arc<WorkingState>>,
    ) -> Self {
        let (parent, base, head) = (parent.into(), base.into(), head.into());
        let conflicts = compare_trees(parent.entries(), base.entries(), head.entries());
        Self {
            parent,
            base,
            head,
            conflicts,
        }
    }

    pub fn parent(&self) -> &WorkingState {
        &self.parent
    }

    pub fn base(&self) -> &WorkingState {
        &self.base
    }

    pub fn head(&self) -> &WorkingState {
        &self.head
    }

    pub fn conflicts(&self) -> &ConflictMap {
        &self.conflicts
    }

    pub fn get(&self, path: &str) -> Option<&Conflict> {
        self.conflicts.get(path)
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of conflicts carrying an explicit resolution.
    pub fn solved_count(&self) -> usize {
        self.conflicts.values().filter(|c| c.is_solved()).count()
    }

    /// Same states, different conflicts.
    pub fn with_conflicts(&self, conflicts: ConflictMap) -> Self {
        Self {
            parent: Arc::clone(&self.parent),
            base: Arc::clone(&self.base),
            head: Arc::clone(&self.head),
            conflicts,
        }
    }

    /// Check that every conflict path exists in at least one of the trees.
    pub fn validate(&self) -> MergeResult<()> {
        let known = |path: &str| {
            self.parent.entries().contains_key(path)
                || self.base.entries().contains_key(path)
                || self.head.entries().contains_key(path)
        };
        match self.conflicts.keys().find(|path| !known(path.as_str())) {
            Some(path) => Err(MergeError::InvariantViolation { path: path.clone() }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, h};

    #[test]
    fn from_states_finds_worked_example_conflicts() {
        let tc = fixtures::tree_conflict();
        let computed = TreeConflict::from_states(
            tc.parent().clone(),
            tc.base().clone(),
            tc.head().clone(),
        );
        assert_eq!(computed, tc);
        assert_eq!(computed.len(), 3);
        assert_eq!(computed.solved_count(), 0);
    }

    #[test]
    fn with_conflicts_shares_states() {
        let tc = fixtures::tree_conflict();
        let emptied = tc.with_conflicts(ConflictMap::new());
        assert!(emptied.is_empty());
        assert!(Arc::ptr_eq(&tc.parent, &emptied.parent));
        assert!(Arc::ptr_eq(&tc.head, &emptied.head));
        assert_eq!(tc.len(), 3);
    }

    #[test]
    fn validate_accepts_detected_conflicts() {
        assert_eq!(fixtures::tree_conflict().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unknown_path() {
        let tc = fixtures::tree_conflict();
        let mut conflicts = tc.conflicts().clone();
        conflicts.insert("nowhere".into(), Conflict::new(h("x"), h("y"), h("z")));

        let err = tc.with_conflicts(conflicts).validate().unwrap_err();
        assert_eq!(err, MergeError::InvariantViolation { path: "nowhere".into() });
    }

    #[test]
    fn json_form_restores_equal_value() {
        let tc = fixtures::tree_conflict();
        let json = serde_json::to_string(&tc).unwrap();
        let decoded: TreeConflict = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, tc);
    }

    #[test]
    fn get_by_path() {
        let tc = fixtures::tree_conflict();
        assert!(tc.get("bothModified").is_some());
        assert!(tc.get("unchanged").is_none());
    }
}
