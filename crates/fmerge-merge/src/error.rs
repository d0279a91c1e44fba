//! Error types for the merge crate.

use fmerge_history::HistoryError;
use fmerge_types::{FieldError, RecordId};

use crate::outcome::Side;

/// Errors that can occur while setting up or running a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The source or destination record was not provided.
    #[error("provided {side} record is absent")]
    InvalidArgument { side: Side },

    /// Source and destination carry different identifiers.
    #[error("records have different origins: source `{src}`, destination `{dst}`")]
    OriginMismatch { src: RecordId, dst: RecordId },

    /// The ancestor recorded for this id has a different shape than the source.
    #[error("snapshot for `{id}` is not compatible: expected {expected}, found {found}")]
    IncompatibleSnapshot {
        id: RecordId,
        expected: String,
        found: String,
    },

    /// A field could not be read or written; nothing was merged.
    #[error(
        "merge failed{}: {source}",
        .field.as_deref().map(|f| format!(" on field `{f}`")).unwrap_or_default()
    )]
    MergeFailure {
        field: Option<String>,
        #[source]
        source: FieldError,
    },

    /// Snapshot history operation failed.
    #[error("history error: {0}")]
    History(#[from] HistoryError),

    /// Merge configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
