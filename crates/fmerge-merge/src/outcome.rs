//! Per-field account of what a merge did.

use std::fmt;

use fmerge_types::RecordId;
use serde::{Deserialize, Serialize};

use crate::policy::MergeConflictPolicy;

/// One of the two records in a merge session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// What happened to a single destination field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum FieldResolution {
    /// The destination value was kept because the source had nothing new.
    Untouched,
    /// No ancestor; the destination lacked the field and took the source value.
    Adopted,
    /// Only the source diverged from the ancestor; its value was taken.
    FastForwarded,
    /// Both sides hold a value; the policy picked `winner`.
    Conflict { winner: Side },
}

impl FieldResolution {
    /// Whether the destination field now holds the source value.
    pub fn took_source(&self) -> bool {
        matches!(
            self,
            FieldResolution::Adopted
                | FieldResolution::FastForwarded
                | FieldResolution::Conflict {
                    winner: Side::Source
                }
        )
    }
}

/// Resolution of a named field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMerge {
    pub field: String,
    pub resolution: FieldResolution,
}

/// The full account of one merge session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Identifier of the merged record, if either side had one.
    pub record_id: Option<RecordId>,
    /// Schema kind of the merged record.
    pub kind: String,
    /// Whether an ancestor snapshot drove the merge.
    pub used_ancestor: bool,
    pub policy: MergeConflictPolicy,
    /// Field resolutions in schema order.
    pub fields: Vec<FieldMerge>,
}

impl MergeOutcome {
    /// Resolution recorded for `field`.
    pub fn resolution(&self, field: &str) -> Option<FieldResolution> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.resolution)
    }

    /// Number of fields adopted without an ancestor.
    pub fn adopted(&self) -> usize {
        self.count(|r| matches!(r, FieldResolution::Adopted))
    }

    /// Number of fast-forwarded fields.
    pub fn fast_forwarded(&self) -> usize {
        self.count(|r| matches!(r, FieldResolution::FastForwarded))
    }

    /// Number of conflicts, whichever side won.
    pub fn conflicts(&self) -> usize {
        self.count(|r| matches!(r, FieldResolution::Conflict { .. }))
    }

    pub fn untouched(&self) -> usize {
        self.count(|r| matches!(r, FieldResolution::Untouched))
    }

    /// Returns `true` if no field needed the conflict policy.
    pub fn is_clean(&self) -> bool {
        self.conflicts() == 0
    }

    /// Names of the fields that took the source value.
    pub fn fields_from_source(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.resolution.took_source())
            .map(|f| f.field.as_str())
            .collect()
    }

    fn count(&self, pred: impl Fn(&FieldResolution) -> bool) -> usize {
        self.fields.iter().filter(|f| pred(&f.resolution)).count()
    }
}
