//! Diff engine for repofs.
//!
//! Compares two [`PathEntryMap`](repofs_store::PathEntryMap)s and reports,
//! per path, what the second map holds where it differs from the first.
//! Diffing is total: any two maps can be compared and nothing can fail.
//!
//! # Key Types
//!
//! - [`EntryDiff`] -- the changed paths and their new values
//! - [`EntryChange`] -- a path's new entry, or a tombstone for a deletion

pub mod entry_diff;

pub use entry_diff::{diff_entries, EntryChange, EntryDiff};
