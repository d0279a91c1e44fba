use fmerge_types::{Mergeable, RecordId};

use crate::error::HistoryResult;
use crate::snapshot::Snapshot;

/// Latest-snapshot history keyed by record identifier.
///
/// All implementations must satisfy these invariants:
/// - At most one snapshot per identifier; `put` overwrites.
/// - `latest_snapshot` never fails and never observes a partially written
///   snapshot.
/// - Concurrent `put` calls for the same identifier are serialized.
pub trait SnapshotStore: Send + Sync {
    /// Store `snapshot` as the latest state of its record.
    fn put(&self, snapshot: Snapshot) -> HistoryResult<()>;

    /// The latest snapshot recorded for `id`, if any.
    fn latest_snapshot(&self, id: &RecordId) -> Option<Snapshot>;
}

/// Record-level helpers available on every [`SnapshotStore`], including
/// trait objects.
pub trait SnapshotStoreExt: SnapshotStore {
    /// Capture `record` and store it as the latest snapshot for its id.
    ///
    /// Fails with [`HistoryError::MissingId`](crate::HistoryError::MissingId)
    /// when the record has no identifier.
    fn save<R: Mergeable>(&self, record: &R) -> HistoryResult<()> {
        self.put(Snapshot::capture(record)?)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStoreExt for S {}
