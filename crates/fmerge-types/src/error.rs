use thiserror::Error;

/// Errors produced while reading or writing a record field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("record shape mismatch: expected `{expected}`, found `{found}`")]
    ShapeMismatch { expected: String, found: String },

    #[error("unknown field `{field}` on record kind `{kind}`")]
    UnknownField { kind: String, field: String },

    #[error("type mismatch on field `{field}`: declared {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
}
