//! Tree entries, blobs, and content-addressed object storage for repofs.
//!
//! The merge engine works on [`PathEntryMap`] values: flat maps from a path
//! to the [`TreeEntry`] found there. Whether paths were flattened from a
//! nested directory structure upstream does not matter to it.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw file content
//! - [`Tree`] -- persisted form of a fully hashed [`PathEntryMap`]
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and drivers
//!   that keep history in memory
//!
//! Objects are immutable once written; the same bytes always land under the
//! same [`ObjectId`](repofs_types::ObjectId).

pub mod entry;
pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

pub use entry::{PathEntryMap, TreeEntry};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{Blob, ObjectKind, StoredObject, Tree};
pub use traits::ObjectStore;
