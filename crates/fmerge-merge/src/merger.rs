//! A single merge session.
//!
//! A [`Merger`] holds a source record (borrowed, never modified), a
//! destination record (owned, merged in place), the snapshot history to find
//! their common ancestor in, and the conflict policy. Construction validates
//! the pair; [`Merger::merge`] consumes the session.
//!
//! Each field in the source schema is merged independently:
//!
//! | ancestor | source | destination | result |
//! |---|---|---|---|
//! | none | null | any | untouched |
//! | none | value | null | adopted |
//! | none | value | value | conflict |
//! | `A` | null or `= A` | any | untouched |
//! | `A` | `≠ A` | `= A` | fast-forwarded |
//! | `A` | `≠ A` | `≠ A` | conflict |
//!
//! Equality is null-safe throughout. A conflict resolves to the source value
//! under [`MergeConflictPolicy::PreferSource`] and leaves the destination
//! alone under [`MergeConflictPolicy::PreferDestination`].

use std::any::type_name;

use fmerge_history::SnapshotStore;
use fmerge_types::{FieldAccess, FieldError, Mergeable};
use tracing::{debug, info};

use crate::error::{MergeError, MergeResult};
use crate::outcome::{FieldMerge, FieldResolution, MergeOutcome, Side};
use crate::policy::MergeConflictPolicy;

/// The merged destination record and the account of how it was produced.
#[derive(Clone, Debug)]
pub struct Merged<R> {
    pub record: R,
    pub outcome: MergeOutcome,
}

/// A validated (source, destination, policy) merge session.
pub struct Merger<'a, R: Mergeable> {
    history: &'a dyn SnapshotStore,
    src: &'a R,
    dst: R,
    policy: MergeConflictPolicy,
    log_conflicts: bool,
}

impl<'a, R: Mergeable> Merger<'a, R> {
    /// Start a session with the default policy.
    ///
    /// Fails with [`MergeError::OriginMismatch`] when both records carry an
    /// identifier and the identifiers differ.
    pub fn new(history: &'a dyn SnapshotStore, src: &'a R, dst: R) -> MergeResult<Self> {
        Self::from_options(history, Some(src), Some(dst))
    }

    /// Start a session from records that may be absent.
    ///
    /// Fails with [`MergeError::InvalidArgument`] if either record is `None`.
    pub fn from_options(
        history: &'a dyn SnapshotStore,
        src: Option<&'a R>,
        dst: Option<R>,
    ) -> MergeResult<Self> {
        let src = src.ok_or(MergeError::InvalidArgument { side: Side::Source })?;
        let dst = dst.ok_or(MergeError::InvalidArgument {
            side: Side::Destination,
        })?;
        if let (Some(src_id), Some(dst_id)) = (src.id(), dst.id()) {
            if src_id != dst_id {
                return Err(MergeError::OriginMismatch {
                    src: src_id.clone(),
                    dst: dst_id.clone(),
                });
            }
        }
        Ok(Self {
            history,
            src,
            dst,
            policy: MergeConflictPolicy::default(),
            log_conflicts: false,
        })
    }

    pub fn with_policy(mut self, policy: MergeConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: MergeConflictPolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> MergeConflictPolicy {
        self.policy
    }

    /// Emit an `info` event for every resolved conflict.
    pub fn log_conflicts(mut self, enabled: bool) -> Self {
        self.log_conflicts = enabled;
        self
    }

    pub fn logs_conflicts(&self) -> bool {
        self.log_conflicts
    }

    /// Merge and return the destination record.
    pub fn merge(self) -> MergeResult<R> {
        self.merge_with_outcome().map(|merged| merged.record)
    }

    /// Merge and return the destination record with a per-field account.
    ///
    /// Either every field merges or the call fails; a failed merge returns no
    /// record.
    pub fn merge_with_outcome(self) -> MergeResult<Merged<R>> {
        let Merger {
            history,
            src,
            mut dst,
            policy,
            log_conflicts,
        } = self;

        if !src.same_shape(&dst) {
            return Err(MergeError::MergeFailure {
                field: None,
                source: FieldError::ShapeMismatch {
                    expected: src.describe_shape(),
                    found: dst.describe_shape(),
                },
            });
        }

        let snapshot = src.id().and_then(|id| history.latest_snapshot(id));
        let ancestor = match (&snapshot, src.id()) {
            (Some(snapshot), Some(id)) => {
                let ancestor = snapshot.matches(src).ok_or_else(|| {
                    MergeError::IncompatibleSnapshot {
                        id: id.clone(),
                        expected: format!("{} ({})", type_name::<R>(), src.describe_shape()),
                        found: snapshot.describe_as::<R>(),
                    }
                })?;
                Some(ancestor)
            }
            _ => None,
        };

        let record_id = src.id().or(dst.id()).cloned();
        debug!(
            id = ?record_id,
            kind = %src.kind(),
            ancestor = ancestor.is_some(),
            %policy,
            "merging records"
        );

        let mut fields = Vec::with_capacity(src.schema().len());
        for field in src.schema().fields() {
            let resolution = match ancestor {
                Some(ancestor) => merge_with_ancestor(field, src, &mut dst, ancestor, policy),
                None => merge_without_ancestor(field, src, &mut dst, policy),
            }
            .map_err(|source| MergeError::MergeFailure {
                field: Some(field.name().to_string()),
                source,
            })?;

            if log_conflicts {
                if let FieldResolution::Conflict { winner } = resolution {
                    info!(
                        id = ?record_id,
                        field = field.name(),
                        %winner,
                        "field conflict resolved"
                    );
                }
            }
            fields.push(FieldMerge {
                field: field.name().to_string(),
                resolution,
            });
        }

        let outcome = MergeOutcome {
            record_id,
            kind: src.kind().to_string(),
            used_ancestor: ancestor.is_some(),
            policy,
            fields,
        };
        debug!(
            adopted = outcome.adopted(),
            fast_forwarded = outcome.fast_forwarded(),
            conflicts = outcome.conflicts(),
            "merge complete"
        );

        Ok(Merged {
            record: dst,
            outcome,
        })
    }
}

fn merge_without_ancestor<R>(
    field: &dyn FieldAccess<R>,
    src: &R,
    dst: &mut R,
    policy: MergeConflictPolicy,
) -> Result<FieldResolution, FieldError> {
    if field.is_null(src)? {
        return Ok(FieldResolution::Untouched);
    }
    if field.is_null(dst)? {
        field.assign(src, dst)?;
        return Ok(FieldResolution::Adopted);
    }
    // Equal values still go through the policy; either side yields the same value.
    resolve_conflict(field, src, dst, policy)
}

fn merge_with_ancestor<R>(
    field: &dyn FieldAccess<R>,
    src: &R,
    dst: &mut R,
    ancestor: &R,
    policy: MergeConflictPolicy,
) -> Result<FieldResolution, FieldError> {
    if field.is_null(src)? || field.same_value(src, ancestor)? {
        return Ok(FieldResolution::Untouched);
    }
    if field.same_value(dst, ancestor)? {
        field.assign(src, dst)?;
        return Ok(FieldResolution::FastForwarded);
    }
    resolve_conflict(field, src, dst, policy)
}

fn resolve_conflict<R>(
    field: &dyn FieldAccess<R>,
    src: &R,
    dst: &mut R,
    policy: MergeConflictPolicy,
) -> Result<FieldResolution, FieldError> {
    let winner = policy.winner();
    if winner == Side::Source {
        field.assign(src, dst)?;
    }
    Ok(FieldResolution::Conflict { winner })
}
