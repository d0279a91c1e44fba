use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use fmerge_types::{Mergeable, RecordId};

use crate::error::{HistoryError, HistoryResult};

/// An immutable copy of a record taken at capture time.
///
/// The copy is shared, so cloning a snapshot is cheap and never copies the
/// record again. A snapshot remembers the concrete Rust type and the schema
/// kind it was captured from; it can only serve as the ancestor of records of
/// that same shape.
#[derive(Clone)]
pub struct Snapshot {
    id: RecordId,
    kind: String,
    type_name: &'static str,
    state: Arc<dyn Any + Send + Sync>,
}

impl Snapshot {
    /// Copy `record` into a new snapshot.
    ///
    /// Fails with [`HistoryError::MissingId`] when the record has no
    /// identifier.
    pub fn capture<R: Mergeable>(record: &R) -> HistoryResult<Self> {
        let id = record.id().cloned().ok_or_else(|| HistoryError::MissingId {
            kind: record.kind().to_string(),
        })?;
        Ok(Self {
            id,
            kind: record.kind().to_string(),
            type_name: type_name::<R>(),
            state: Arc::new(record.clone()),
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Schema kind of the captured record.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Rust type name of the captured record, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The captured record, if it was captured as an `R`.
    ///
    /// This checks the Rust type only; use [`matches`](Self::matches) to also
    /// check the schema kind of runtime-shaped records.
    pub fn downcast<R: Mergeable>(&self) -> Option<&R> {
        self.state.downcast_ref::<R>()
    }

    /// The captured record, if it has the same type and shape as `record`.
    pub fn matches<'a, R: Mergeable>(&'a self, record: &R) -> Option<&'a R> {
        let captured = self.downcast::<R>()?;
        captured.same_shape(record).then_some(captured)
    }

    /// Shape of the captured record, read as an `R` when possible.
    pub fn describe_as<R: Mergeable>(&self) -> String {
        match self.downcast::<R>() {
            Some(captured) => format!("{} ({})", self.type_name, captured.describe_shape()),
            None => format!("{} ({})", self.type_name, self.kind),
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    use fmerge_types::{DynamicRecord, DynamicSchema, FieldType, Schema};
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: Option<RecordId>,
        value: Option<i64>,
    }

    static COUNTER: LazyLock<Schema<Counter>> = LazyLock::new(|| {
        Schema::<Counter>::new("counter").field("value", |c| &c.value, |c| &mut c.value)
    });

    impl Mergeable for Counter {
        fn id(&self) -> Option<&RecordId> {
            self.id.as_ref()
        }

        fn schema(&self) -> &Schema<Self> {
            &COUNTER
        }
    }

    #[test]
    fn capture_copies_state() {
        let mut c = Counter {
            id: Some("c-1".into()),
            value: Some(1),
        };
        let snap = Snapshot::capture(&c).unwrap();
        c.value = Some(2);

        assert_eq!(snap.id().as_str(), "c-1");
        assert_eq!(snap.kind(), "counter");
        assert_eq!(snap.downcast::<Counter>().unwrap().value, Some(1));
    }

    #[test]
    fn capture_requires_id() {
        let c = Counter {
            id: None,
            value: Some(1),
        };
        let err = Snapshot::capture(&c).unwrap_err();
        assert!(matches!(err, HistoryError::MissingId { ref kind } if kind == "counter"));
    }

    #[test]
    fn downcast_to_other_type_fails() {
        let shape = DynamicSchema::new("counter")
            .field("value", FieldType::Integer)
            .into_shared();
        let rec = DynamicRecord::new(shape).with_id("c-1");
        let snap = Snapshot::capture(&rec).unwrap();
        assert!(snap.downcast::<Counter>().is_none());
        assert!(snap.downcast::<DynamicRecord>().is_some());
    }

    #[test]
    fn matches_checks_kind() {
        let a = DynamicSchema::new("a")
            .field("x", FieldType::Any)
            .into_shared();
        let b = DynamicSchema::new("b")
            .field("x", FieldType::Any)
            .into_shared();
        let rec_a = DynamicRecord::new(a)
            .with_id("same")
            .with("x", json!(1))
            .unwrap();
        let rec_b = DynamicRecord::new(b).with_id("same");

        let snap = Snapshot::capture(&rec_a).unwrap();
        assert!(snap.matches(&rec_a).is_some());
        assert!(snap.matches(&rec_b).is_none());
    }

    #[test]
    fn matches_checks_field_set() {
        let narrow = DynamicSchema::new("account")
            .field("owner", FieldType::String)
            .into_shared();
        let wide = DynamicSchema::new("account")
            .field("owner", FieldType::String)
            .field("balance", FieldType::Integer)
            .into_shared();
        let captured = DynamicRecord::new(narrow).with_id("acc");
        let current = DynamicRecord::new(wide).with_id("acc");

        let snap = Snapshot::capture(&captured).unwrap();
        assert!(snap.matches(&current).is_none());
        assert!(snap
            .describe_as::<DynamicRecord>()
            .ends_with("(account{owner: string})"));
    }

    #[test]
    fn describe_as_other_type_uses_kind() {
        let c = Counter {
            id: Some("c-1".into()),
            value: None,
        };
        let snap = Snapshot::capture(&c).unwrap();
        assert!(snap.describe_as::<DynamicRecord>().ends_with("(counter)"));
        assert!(snap.describe_as::<Counter>().ends_with("(counter{value})"));
    }
}
