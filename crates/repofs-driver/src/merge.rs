//! Merging commits through a driver.

use repofs_merge::{
    merge_commit_with, solve_tree_with, Author, ConflictMap, MergeConfig, TreeConflict,
    WorkingState,
};
use repofs_store::{PathEntryMap, Tree};
use repofs_types::CommitRef;
use tracing::debug;

use crate::error::DriverResult;
use crate::traits::Driver;

/// Fetch `base`, `head`, and their merge base, and compute the conflicts.
///
/// Commits without shared history are compared against an empty tree, so
/// every path either side has is an addition.
pub fn compare_refs(
    driver: &dyn Driver,
    base: &CommitRef,
    head: &CommitRef,
) -> DriverResult<TreeConflict> {
    let parent = match driver.find_parent_commit(base, head)? {
        Some(parent) => driver.fetch_working_state(&parent)?,
        None => empty_state()?,
    };
    let base_state = driver.fetch_working_state(base)?;
    let head_state = driver.fetch_working_state(head)?;

    debug!(%base, %head, parent = %parent.head(), "comparing refs");
    Ok(TreeConflict::from_states(parent, base_state, head_state))
}

/// Merge `head` into `base` and persist the result.
///
/// `resolutions` may cover any subset of the conflicts; the rest keep the
/// base side. The new commit has `base` as first parent and `head` second.
/// When `branch` is given it is moved to the new commit.
pub fn merge_refs(
    driver: &dyn Driver,
    base: &CommitRef,
    head: &CommitRef,
    resolutions: &ConflictMap,
    author: Author,
    config: &MergeConfig,
    branch: Option<&str>,
) -> DriverResult<CommitRef> {
    let tree_conflict = compare_refs(driver, base, head)?;
    let solved = solve_tree_with(&tree_conflict, resolutions, config)?;
    let builder = merge_commit_with(&solved, vec![base.clone(), head.clone()], author, config)?;
    let commit = driver.flush_commit(&builder)?;
    if let Some(name) = branch {
        driver.update_branch(name, &commit)?;
    }
    Ok(commit)
}

/// Working state of the empty tree, referenced by the empty tree's hash.
fn empty_state() -> DriverResult<WorkingState> {
    let id = Tree::default().to_stored_object()?.compute_id();
    Ok(WorkingState::with_tree(
        CommitRef::from_object_id(&id),
        PathEntryMap::new(),
    ))
}
