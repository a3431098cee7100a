//! Three-way comparison: find the minimal set of conflicting paths.

use repofs_diff::diff_entries;
use repofs_store::PathEntryMap;
use tracing::debug;

use crate::conflict::{Conflict, ConflictMap};

/// Compare `base` and `head` against their common ancestor `parent`.
///
/// A path conflicts iff both sides changed it relative to `parent` and
/// ended up with different values. A path changed on one side only is not a
/// conflict (that side wins when the tree is rebuilt), and neither is a path
/// both sides deleted or changed to the same hash.
pub fn compare_trees(
    parent: &PathEntryMap,
    base: &PathEntryMap,
    head: &PathEntryMap,
) -> ConflictMap {
    let base_diff = diff_entries(parent, base);
    let head_diff = diff_entries(parent, head);

    let conflicts: ConflictMap = base_diff
        .iter()
        .filter_map(|(path, base_change)| {
            let head_change = head_diff.get(path)?;
            if head_change == base_change {
                return None;
            }
            let conflict = Conflict::new(
                parent.get(path).and_then(|e| e.hash()),
                base_change.entry().and_then(|e| e.hash()),
                head_change.entry().and_then(|e| e.hash()),
            );
            Some((path.clone(), conflict))
        })
        .collect();

    debug!(
        base_changes = base_diff.len(),
        head_changes = head_diff.len(),
        conflicts = conflicts.len(),
        "compared trees"
    );
    conflicts
}
