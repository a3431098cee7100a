//! Merge engine for repofs.
//!
//! Implements three-way merges between a common ancestor and two divergent
//! [`WorkingState`]s:
//!
//! 1. [`TreeConflict::from_states`] diffs both sides against the ancestor and
//!    keeps only the paths both sides changed to different results.
//! 2. The caller resolves some or all of those conflicts; [`solve_tree`]
//!    folds the resolutions in and defaults the rest to
//!    [`Resolution::KeepBase`].
//! 3. [`merge_commit`] turns the resolved tree into a [`CommitBuilder`] for a
//!    driver to persist.
//!
//! Every function here is pure and synchronous. Inputs are never mutated;
//! each step returns a new value.

pub mod commit;
pub mod compare;
pub mod config;
pub mod conflict;
pub mod error;
pub mod solve;
pub mod tree_conflict;
pub mod working_state;

#[cfg(test)]
mod fixtures;

pub use commit::{merge_commit, merge_commit_with, Author, CommitBuilder};
pub use compare::compare_trees;
pub use config::MergeConfig;
pub use conflict::{Conflict, ConflictMap, Resolution};
pub use error::{MergeError, MergeResult};
pub use solve::{solve_tree, solve_tree_with, solved_entries, solved_entries_with};
pub use tree_conflict::TreeConflict;
pub use working_state::{Change, ChangeSet, WorkingState};
