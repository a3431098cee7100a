//! Foundation types for repofs.
//!
//! Every other repofs crate depends on `repofs-types`. The types here are
//! opaque identifiers: the merge engine only ever compares them for equality.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Content hash of a blob or tree (BLAKE3)
//! - [`CommitRef`]: Reference to a commit as handed out by a driver

pub mod commit_ref;
pub mod error;
pub mod object;

pub use commit_ref::CommitRef;
pub use error::TypeError;
pub use object::ObjectId;
