use repofs_merge::{CommitBuilder, WorkingState};
use repofs_store::Blob;
use repofs_types::{CommitRef, ObjectId};

use crate::error::DriverResult;

/// Access to a repository backend.
///
/// Implementations own all I/O, retries, and authentication. The merge
/// engine only sees the values returned here.
pub trait Driver: Send + Sync {
    /// Names of all branches, sorted.
    fn fetch_branches(&self) -> DriverResult<Vec<String>>;

    /// The commit a branch currently points to.
    fn resolve_branch(&self, name: &str) -> DriverResult<CommitRef>;

    /// Create branch `name` pointing at the same commit as `from`.
    ///
    /// Fails if `from` does not exist or `name` already does.
    fn create_branch(&self, from: &str, name: &str) -> DriverResult<CommitRef>;

    /// Move an existing branch to `commit`, typically after a flush.
    fn update_branch(&self, name: &str, commit: &CommitRef) -> DriverResult<()>;

    /// Fetch the tree of `commit` as a clean working state.
    fn fetch_working_state(&self, commit: &CommitRef) -> DriverResult<WorkingState>;

    /// Read the content stored under `id`.
    fn fetch_blob(&self, id: &ObjectId) -> DriverResult<Blob>;

    /// A best common ancestor of two commits, if they share history.
    ///
    /// "Best" means it is not an ancestor of another common ancestor. After
    /// criss-cross merges several commits qualify and any of them may be
    /// returned.
    fn find_parent_commit(
        &self,
        base: &CommitRef,
        head: &CommitRef,
    ) -> DriverResult<Option<CommitRef>>;

    /// Write the blobs, tree, and commit described by `builder`.
    ///
    /// Placeholder entries are replaced by the hash of the blob written for
    /// the same path. Every parent must be an existing commit. Returns the
    /// new commit; no branch is moved.
    fn flush_commit(&self, builder: &CommitBuilder) -> DriverResult<CommitRef>;
}
