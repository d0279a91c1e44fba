//! Application-facing merge entry point.
//!
//! [`MergeEngine`] owns the snapshot history and the merge configuration and
//! hands out [`Merger`] sessions bound to them. Applications construct one
//! engine and share it; tests usually build their own with
//! [`MergeEngine::in_memory`].

use std::sync::Arc;

use fmerge_history::{InMemorySnapshotStore, SnapshotStore, SnapshotStoreExt};
use fmerge_types::Mergeable;
use tracing::debug;

use crate::config::MergeConfig;
use crate::error::MergeResult;
use crate::merger::{Merged, Merger};
use crate::policy::MergeConflictPolicy;

/// Shared merge entry point bound to one snapshot history.
#[derive(Clone)]
pub struct MergeEngine {
    history: Arc<dyn SnapshotStore>,
    config: MergeConfig,
}

impl MergeEngine {
    pub fn new(history: Arc<dyn SnapshotStore>) -> Self {
        Self::with_config(history, MergeConfig::default())
    }

    pub fn with_config(history: Arc<dyn SnapshotStore>, config: MergeConfig) -> Self {
        Self { history, config }
    }

    /// An engine over a fresh, empty in-memory history.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySnapshotStore::new()))
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn history(&self) -> &dyn SnapshotStore {
        self.history.as_ref()
    }

    /// Record `record` as the ancestor of any copies made from it from now on.
    pub fn capture<R: Mergeable>(&self, record: &R) -> MergeResult<()> {
        self.history.save(record)?;
        Ok(())
    }

    /// Capture `record`, then return a copy to edit independently.
    ///
    /// This is the branching point of an optimistic edit: every copy that is
    /// later merged back should come from a `fork` (or follow an explicit
    /// [`capture`](Self::capture)) so that the history holds their ancestor.
    pub fn fork<R: Mergeable>(&self, record: &R) -> MergeResult<R> {
        self.capture(record)?;
        debug!(id = ?record.id(), kind = %record.kind(), "record forked");
        Ok(record.clone())
    }

    /// Open a session using the configured default policy.
    pub fn session<'a, R: Mergeable>(&'a self, src: &'a R, dst: R) -> MergeResult<Merger<'a, R>> {
        Ok(Merger::new(self.history.as_ref(), src, dst)?
            .with_policy(self.config.default_policy)
            .log_conflicts(self.config.log_conflicts))
    }

    /// Merge `src` into `dst` with the configured default policy.
    pub fn merge<R: Mergeable>(&self, src: &R, dst: R) -> MergeResult<R> {
        self.session(src, dst)?.merge()
    }

    /// Merge `src` into `dst` with an explicit policy.
    pub fn merge_with_policy<R: Mergeable>(
        &self,
        src: &R,
        dst: R,
        policy: MergeConflictPolicy,
    ) -> MergeResult<R> {
        self.session(src, dst)?.with_policy(policy).merge()
    }

    /// Merge and report how each field was resolved.
    pub fn merge_with_outcome<R: Mergeable>(&self, src: &R, dst: R) -> MergeResult<Merged<R>> {
        self.session(src, dst)?.merge_with_outcome()
    }
}

impl std::fmt::Debug for MergeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
