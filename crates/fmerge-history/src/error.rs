/// Errors from snapshot history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The record has no identifier, so there is nothing to key it by.
    #[error("cannot snapshot `{kind}` record: identifier is unset")]
    MissingId { kind: String },

    /// A writer panicked while holding the history lock.
    #[error("history lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
