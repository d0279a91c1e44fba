//! Snapshot history for FieldMerge.
//!
//! The history maps a record identifier to the most recently captured
//! snapshot of that record. The merge engine reads it to recover the common
//! ancestor of two divergent copies.
//!
//! # Usage Convention
//!
//! Capture a snapshot *before* branching edits: save the record, then clone
//! it into the copies that will be edited independently. The history never
//! decides on its own when to capture.
//!
//! # Design Rules
//!
//! 1. One entry per identifier; saving again overwrites (last write wins).
//! 2. No eviction, no TTL, no size bound.
//! 3. Records without an identifier cannot be saved.
//! 4. Reads never fail and observe either the previous or the new snapshot.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`InMemorySnapshotStore`] -- `HashMap`-based store behind a `RwLock`

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{HistoryError, HistoryResult};
pub use memory::InMemorySnapshotStore;
pub use snapshot::Snapshot;
pub use traits::{SnapshotStore, SnapshotStoreExt};
