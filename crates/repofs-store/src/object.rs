use std::borrow::Cow;
use std::collections::BTreeMap;

use repofs_types::ObjectId;
use serde::{Deserialize, Serialize};

use crate::entry::{PathEntryMap, TreeEntry};
use crate::error::{StoreError, StoreResult};

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw file content.
    Blob,
    /// Flat path listing of a fully hashed tree.
    Tree,
    /// Serialized commit record written by a driver.
    Commit,
}

impl ObjectKind {
    /// Domain tag prepended before hashing, so a blob and a tree with
    /// identical bytes never share an ID.
    fn domain(&self) -> &'static str {
        match self {
            Self::Blob => "repofs-blob-v1",
            Self::Tree => "repofs-tree-v1",
            Self::Commit => "repofs-commit-v1",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

/// A stored object: kind tag + serialized data.
///
/// The store never interprets `data`; it is keyed by the domain-separated
/// hash of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// What the data encodes.
    pub kind: ObjectKind,
    /// The serialized bytes.
    pub data: Vec<u8>,
}

impl StoredObject {
    /// Create a stored object from kind and data.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Compute the content-addressed ID for this object.
    pub fn compute_id(&self) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.kind.domain().as_bytes());
        hasher.update(b":");
        hasher.update(&self.data);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }

    /// Size of `data` in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn expect_kind(&self, kind: ObjectKind) -> StoreResult<()> {
        if self.kind != kind {
            return Err(StoreError::CorruptObject {
                id: self.compute_id(),
                reason: format!("expected {kind}, got {}", self.kind),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// File content. Content-resolved conflicts travel as blobs until a driver
/// persists them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    /// Create a blob from raw bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Create a blob holding the UTF-8 bytes of `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            data: text.into().into_bytes(),
        }
    }

    /// The raw content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length of the content in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The content as text. Invalid UTF-8 sequences are replaced.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// The hash this blob is stored under.
    pub fn id(&self) -> ObjectId {
        self.to_stored_object().compute_id()
    }

    /// Convert into a `StoredObject` for storage.
    pub fn to_stored_object(&self) -> StoredObject {
        StoredObject::new(ObjectKind::Blob, self.data.clone())
    }

    /// Decode from a `StoredObject`. Fails if it is not a blob.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.expect_kind(ObjectKind::Blob)?;
        Ok(Self {
            data: obj.data.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Persisted tree: every path mapped to a real content hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Content hash per path, sorted by path.
    pub entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    /// Create a tree from already hashed entries.
    pub fn new(entries: BTreeMap<String, ObjectId>) -> Self {
        Self { entries }
    }

    /// Build a tree from merge output. Fails on the first placeholder entry.
    pub fn from_entries(entries: &PathEntryMap) -> StoreResult<Self> {
        let entries = entries
            .iter()
            .map(|(path, entry)| {
                entry
                    .hash()
                    .map(|hash| (path.clone(), hash))
                    .ok_or_else(|| StoreError::UnassignedEntry { path: path.clone() })
            })
            .collect::<StoreResult<BTreeMap<_, _>>>()?;
        Ok(Self { entries })
    }

    /// The entry map a working state is built from.
    pub fn to_entries(&self) -> PathEntryMap {
        self.entries
            .iter()
            .map(|(path, hash)| (path.clone(), TreeEntry::new(*hash)))
            .collect()
    }

    /// Encode as JSON inside a `StoredObject`.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredObject::new(ObjectKind::Tree, data))
    }

    /// Decode from a `StoredObject`. Fails if it is not a tree.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.expect_kind(ObjectKind::Tree)?;
        serde_json::from_slice(&obj.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Hash stored at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    /// Number of paths in the tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no paths.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
