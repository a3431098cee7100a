//! Repository drivers for repofs.
//!
//! The merge engine never talks to a repository. A [`Driver`] supplies the
//! working states it compares and persists the commits it assembles. This
//! crate defines that boundary, ships an in-memory backend, and wires the
//! two together:
//!
//! - [`compare_refs`] -- find the merge base of two commits and compute
//!   their [`TreeConflict`](repofs_merge::TreeConflict)
//! - [`merge_refs`] -- compare, apply resolutions, flush the merge commit,
//!   and optionally advance a branch to it

pub mod error;
pub mod memory;
pub mod merge;
pub mod traits;

pub use error::{DriverError, DriverResult};
pub use memory::InMemoryDriver;
pub use merge::{compare_refs, merge_refs};
pub use traits::Driver;
