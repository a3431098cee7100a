use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::RwLock;

use repofs_merge::{Author, CommitBuilder, WorkingState};
use repofs_store::{
    Blob, InMemoryObjectStore, ObjectKind, ObjectStore, PathEntryMap, StoreError, StoredObject,
    Tree, TreeEntry,
};
use repofs_types::{CommitRef, ObjectId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DriverError, DriverResult};
use crate::traits::Driver;

/// Commit as persisted in the object store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct CommitRecord {
    tree: ObjectId,
    parents: Vec<CommitRef>,
    author: Author,
    message: String,
}

/// Driver keeping the whole repository in memory.
///
/// Commits are content-addressed objects in an [`InMemoryObjectStore`];
/// a [`CommitRef`] is the hex ID of the commit record.
pub struct InMemoryDriver {
    store: InMemoryObjectStore,
    branches: RwLock<BTreeMap<String, CommitRef>>,
}

impl InMemoryDriver {
    /// Create a driver with no commits and no branches.
    pub fn new() -> Self {
        Self {
            store: InMemoryObjectStore::new(),
            branches: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store `text` as a blob and return its hash.
    pub fn write_blob(&self, text: &str) -> DriverResult<ObjectId> {
        Ok(self.store.write(&Blob::from_text(text).to_stored_object())?)
    }

    /// Write a commit whose entries are all hashed already.
    ///
    /// Every parent must be a commit of this driver.
    pub fn create_commit(
        &self,
        entries: &PathEntryMap,
        parents: Vec<CommitRef>,
        author: Author,
        message: &str,
    ) -> DriverResult<CommitRef> {
        self.ensure_commits(&parents)?;
        self.write_commit(entries, parents, author, message)
    }

    /// Point `name` at `commit`, creating the branch if needed.
    pub fn set_branch(&self, name: &str, commit: CommitRef) {
        self.branches
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), commit);
    }

    /// Every commit written so far, ordered by ID.
    pub fn commits(&self) -> Vec<CommitRef> {
        self.store
            .ids_of_kind(ObjectKind::Commit)
            .iter()
            .map(CommitRef::from_object_id)
            .collect()
    }

    /// Parents recorded for `commit`.
    pub fn parents_of(&self, commit: &CommitRef) -> DriverResult<Vec<CommitRef>> {
        Ok(self.read_commit(commit)?.parents)
    }

    fn write_commit(
        &self,
        entries: &PathEntryMap,
        parents: Vec<CommitRef>,
        author: Author,
        message: &str,
    ) -> DriverResult<CommitRef> {
        let tree = Tree::from_entries(entries).map_err(unassigned)?;
        let tree_id = self.store.write(&tree.to_stored_object()?)?;
        let record = CommitRecord {
            tree: tree_id,
            parents,
            author,
            message: message.to_string(),
        };
        let data =
            serde_json::to_vec(&record).map_err(|e| DriverError::Serialization(e.to_string()))?;
        let id = self.store.write(&StoredObject::new(ObjectKind::Commit, data))?;
        Ok(CommitRef::from_object_id(&id))
    }

    /// Fail with `CommitNotFound` unless every ref names a stored commit.
    fn ensure_commits(&self, commits: &[CommitRef]) -> DriverResult<()> {
        for commit in commits {
            self.read_commit(commit).map_err(|err| match err {
                DriverError::InvalidRef(_) => DriverError::CommitNotFound(commit.clone()),
                other => other,
            })?;
        }
        Ok(())
    }

    fn read_commit(&self, commit: &CommitRef) -> DriverResult<CommitRecord> {
        let id = ObjectId::from_hex(commit.as_str())?;
        let stored = self
            .store
            .read(&id)?
            .filter(|obj| obj.kind == ObjectKind::Commit)
            .ok_or_else(|| DriverError::CommitNotFound(commit.clone()))?;
        serde_json::from_slice(&stored.data).map_err(|e| DriverError::Serialization(e.to_string()))
    }

    /// `commit` and everything reachable from it.
    fn ancestors(&self, commit: &CommitRef) -> DriverResult<HashSet<CommitRef>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([commit.clone()]);
        while let Some(next) = queue.pop_front() {
            if seen.insert(next.clone()) {
                queue.extend(self.read_commit(&next)?.parents);
            }
        }
        Ok(seen)
    }
}

impl Default for InMemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for InMemoryDriver {
    fn fetch_branches(&self) -> DriverResult<Vec<String>> {
        Ok(self
            .branches
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect())
    }

    fn resolve_branch(&self, name: &str) -> DriverResult<CommitRef> {
        self.branches
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| DriverError::BranchNotFound(name.to_string()))
    }

    fn create_branch(&self, from: &str, name: &str) -> DriverResult<CommitRef> {
        let mut branches = self.branches.write().expect("lock poisoned");
        let commit = branches
            .get(from)
            .cloned()
            .ok_or_else(|| DriverError::BranchNotFound(from.to_string()))?;
        if branches.contains_key(name) {
            return Err(DriverError::BranchExists(name.to_string()));
        }
        branches.insert(name.to_string(), commit.clone());
        debug!(%from, %name, %commit, "created branch");
        Ok(commit)
    }

    fn update_branch(&self, name: &str, commit: &CommitRef) -> DriverResult<()> {
        self.ensure_commits(std::slice::from_ref(commit))?;
        let mut branches = self.branches.write().expect("lock poisoned");
        let tip = branches
            .get_mut(name)
            .ok_or_else(|| DriverError::BranchNotFound(name.to_string()))?;
        *tip = commit.clone();
        debug!(%name, %commit, "moved branch");
        Ok(())
    }

    fn fetch_working_state(&self, commit: &CommitRef) -> DriverResult<WorkingState> {
        let record = self.read_commit(commit)?;
        let stored = self
            .store
            .read(&record.tree)?
            .ok_or(DriverError::ObjectNotFound(record.tree))?;
        let tree = Tree::from_stored_object(&stored)?;
        Ok(WorkingState::with_tree(commit.clone(), tree.to_entries()))
    }

    fn fetch_blob(&self, id: &ObjectId) -> DriverResult<Blob> {
        let stored = self
            .store
            .read(id)?
            .ok_or(DriverError::ObjectNotFound(*id))?;
        Ok(Blob::from_stored_object(&stored)?)
    }

    fn find_parent_commit(
        &self,
        base: &CommitRef,
        head: &CommitRef,
    ) -> DriverResult<Option<CommitRef>> {
        let base_ancestry = self.ancestors(base)?;

        // Common ancestors reachable from head without crossing another one.
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([head.clone()]);
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if base_ancestry.contains(&next) {
                candidates.push(next);
            } else {
                queue.extend(self.read_commit(&next)?.parents);
            }
        }

        let reachable = candidates
            .iter()
            .map(|candidate| self.ancestors(candidate))
            .collect::<DriverResult<Vec<_>>>()?;
        let best = candidates.iter().enumerate().find(|(i, candidate)| {
            !reachable
                .iter()
                .enumerate()
                .any(|(j, ancestry)| j != *i && ancestry.contains(*candidate))
        });
        Ok(best.map(|(_, candidate)| candidate.clone()))
    }

    fn flush_commit(&self, builder: &CommitBuilder) -> DriverResult<CommitRef> {
        self.ensure_commits(builder.parents())?;

        let mut blob_ids = BTreeMap::new();
        for (path, blob) in builder.blobs() {
            blob_ids.insert(path, self.store.write(&blob.to_stored_object())?);
        }

        let entries: PathEntryMap = builder
            .tree_entries()
            .iter()
            .map(|(path, entry)| {
                let entry = match (entry.is_assigned(), blob_ids.get(path)) {
                    (false, Some(id)) => TreeEntry::new(*id),
                    _ => *entry,
                };
                (path.clone(), entry)
            })
            .collect();

        let commit = self.write_commit(
            &entries,
            builder.parents().to_vec(),
            builder.author().clone(),
            builder.message(),
        )?;
        debug!(
            %commit,
            parents = builder.parents().len(),
            blobs = blob_ids.len(),
            "flushed commit"
        );
        Ok(commit)
    }
}

fn unassigned(err: StoreError) -> DriverError {
    match err {
        StoreError::UnassignedEntry { path } => DriverError::UnassignedEntry { path },
        other => DriverError::Store(other),
    }
}

impl std::fmt::Debug for InMemoryDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let branches = self.branches.read().expect("lock poisoned");
        f.debug_struct("InMemoryDriver")
            .field("store", &self.store)
            .field("branches", &branches.keys().collect::<Vec<_>>())
            .finish()
    }
}
