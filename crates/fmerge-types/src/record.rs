use crate::id::RecordId;
use crate::schema::Schema;

/// A record that can take part in a three-way merge.
///
/// Implementors expose a stable identifier (unset until the record is first
/// persisted) and the [`Schema`] describing their fields. Statically shaped
/// types usually keep their schema in a `static` built on first use:
///
/// ```rust
/// use std::sync::LazyLock;
/// use fmerge_types::{Mergeable, RecordId, Schema};
///
/// #[derive(Clone)]
/// struct Note {
///     id: Option<RecordId>,
///     body: Option<String>,
/// }
///
/// static NOTE: LazyLock<Schema<Note>> = LazyLock::new(|| {
///     Schema::<Note>::new("note").field("body", |n| &n.body, |n| &mut n.body)
/// });
///
/// impl Mergeable for Note {
///     fn id(&self) -> Option<&RecordId> {
///         self.id.as_ref()
///     }
///
///     fn schema(&self) -> &Schema<Self> {
///         &NOTE
///     }
/// }
/// ```
pub trait Mergeable: Clone + Send + Sync + 'static {
    /// The record identifier, or `None` before first persistence.
    fn id(&self) -> Option<&RecordId>;

    /// The ordered field set of this record.
    fn schema(&self) -> &Schema<Self>;

    /// The shape name; shorthand for `self.schema().kind()`.
    fn kind(&self) -> &str {
        self.schema().kind()
    }

    /// Whether `other` has the same shape: the same kind and the same
    /// ordered field names. Only records of the same shape can be merged.
    fn same_shape(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.schema().field_names() == other.schema().field_names()
    }

    /// The shape rendered as `kind{field, ...}`, for diagnostics.
    fn describe_shape(&self) -> String {
        format!("{}{{{}}}", self.kind(), self.schema().field_names().join(", "))
    }
}
