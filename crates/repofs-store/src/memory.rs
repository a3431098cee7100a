use std::collections::HashMap;
use std::sync::RwLock;

use repofs_types::ObjectId;
use tracing::trace;

use crate::error::StoreResult;
use crate::object::{ObjectKind, StoredObject};
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Backs in-memory drivers and tests. Objects are cloned on read and write.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, StoredObject>>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// IDs of every stored object of `kind`, sorted.
    ///
    /// Drivers use this to enumerate commit records, which nothing else
    /// indexes.
    pub fn ids_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map
            .iter()
            .filter(|(_, obj)| obj.kind == kind)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Object counts per kind, in blob, tree, commit order.
    fn kind_counts(&self) -> [(ObjectKind, usize); 3] {
        let map = self.objects.read().expect("lock poisoned");
        [ObjectKind::Blob, ObjectKind::Tree, ObjectKind::Commit]
            .map(|kind| (kind, map.values().filter(|obj| obj.kind == kind).count()))
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry(id).or_insert_with(|| object.clone());
        trace!(id = %id.short_hex(), kind = %object.kind, size = object.size(), "object written");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("InMemoryObjectStore");
        out.field("object_count", &self.len());
        for (kind, count) in self.kind_counts() {
            match kind {
                ObjectKind::Blob => out.field("blobs", &count),
                ObjectKind::Tree => out.field("trees", &count),
                ObjectKind::Commit => out.field("commits", &count),
            };
        }
        out.finish()
    }
}
