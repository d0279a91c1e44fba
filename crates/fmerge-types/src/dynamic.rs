//! Records whose shape is only known at runtime.
//!
//! A [`DynamicSchema`] declares a record kind and a typed list of fields. A
//! [`DynamicRecord`] holds JSON values for those fields and refuses values
//! that do not match the declared type. Field accessors for dynamic records
//! are fallible: reading a field the record's schema does not declare, or
//! writing a value its declared type rejects, is a [`FieldError`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldError;
use crate::id::RecordId;
use crate::record::Mergeable;
use crate::schema::{FieldAccess, Schema};

/// Declared type of a dynamic field. Null is admitted by every type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Any,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl FieldType {
    /// Whether `value` may be stored in a field of this type.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (FieldType::Any, _) => true,
            (FieldType::Bool, Value::Bool(_)) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Float, Value::Number(_)) => true,
            (FieldType::String, Value::String(_)) => true,
            (FieldType::Array, Value::Array(_)) => true,
            (FieldType::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Any => "any",
            FieldType::Bool => "bool",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::String => "string",
            FieldType::Array => "array",
            FieldType::Object => "object",
        };
        f.write_str(name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runtime description of a record kind.
pub struct DynamicSchema {
    schema: Schema<DynamicRecord>,
    types: BTreeMap<String, FieldType>,
}

impl DynamicSchema {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            schema: Schema::new(kind),
            types: BTreeMap::new(),
        }
    }

    /// Declare a field. Redeclaring a name replaces its type but keeps its
    /// original position.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        if self.types.insert(name.clone(), ty).is_none() {
            self.schema = self.schema.with_accessor(DynamicField { name });
        }
        self
    }

    pub fn kind(&self) -> &str {
        self.schema.kind()
    }

    /// Declared type of `name`, if the field exists.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.types.get(name).copied()
    }

    pub fn schema(&self) -> &Schema<DynamicRecord> {
        &self.schema
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Same kind, same fields in the same order, same declared types.
    pub fn same_shape(&self, other: &DynamicSchema) -> bool {
        self.kind() == other.kind()
            && self.schema.field_names() == other.schema.field_names()
            && self.types == other.types
    }

    /// The shape rendered as `kind{field: type, ...}`.
    pub fn describe(&self) -> String {
        let fields: Vec<String> = self
            .schema
            .field_names()
            .into_iter()
            .map(|name| match self.types.get(name) {
                Some(ty) => format!("{name}: {ty}"),
                None => name.to_string(),
            })
            .collect();
        format!("{}{{{}}}", self.kind(), fields.join(", "))
    }
}

impl fmt::Debug for DynamicSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicSchema")
            .field("kind", &self.kind())
            .field("types", &self.types)
            .finish()
    }
}

/// A record holding JSON field values under a [`DynamicSchema`].
#[derive(Clone)]
pub struct DynamicRecord {
    id: Option<RecordId>,
    shape: Arc<DynamicSchema>,
    values: BTreeMap<String, Value>,
}

impl DynamicRecord {
    /// Create a record with every field null.
    pub fn new(shape: Arc<DynamicSchema>) -> Self {
        Self {
            id: None,
            shape,
            values: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    pub fn shape(&self) -> &Arc<DynamicSchema> {
        &self.shape
    }

    /// Current value of `name`; `None` when the field is null or undeclared.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Set a field, checking it is declared and the value matches its type.
    /// Setting `Value::Null` clears the field.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        let ty = self.declared(name)?;
        if !ty.admits(&value) {
            return Err(FieldError::TypeMismatch {
                field: name.to_string(),
                expected: ty.to_string(),
                found: json_type_name(&value).to_string(),
            });
        }
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: Value) -> Result<Self, FieldError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Non-null values keyed by field name.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    fn declared(&self, name: &str) -> Result<FieldType, FieldError> {
        self.shape
            .field_type(name)
            .ok_or_else(|| FieldError::UnknownField {
                kind: self.shape.kind().to_string(),
                field: name.to_string(),
            })
    }

    fn lookup(&self, name: &str) -> Result<Option<&Value>, FieldError> {
        self.declared(name)?;
        Ok(self.values.get(name))
    }
}

impl Mergeable for DynamicRecord {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn schema(&self) -> &Schema<Self> {
        self.shape.schema()
    }

    fn same_shape(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shape, &other.shape) || self.shape.same_shape(&other.shape)
    }

    fn describe_shape(&self) -> String {
        self.shape.describe()
    }
}

impl PartialEq for DynamicRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.shape.kind() == other.shape.kind()
            && self.values == other.values
    }
}

impl fmt::Debug for DynamicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRecord")
            .field("id", &self.id)
            .field("kind", &self.shape.kind())
            .field("values", &self.values)
            .finish()
    }
}

struct DynamicField {
    name: String,
}

impl FieldAccess<DynamicRecord> for DynamicField {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_null(&self, record: &DynamicRecord) -> Result<bool, FieldError> {
        Ok(record.lookup(&self.name)?.is_none())
    }

    fn same_value(&self, left: &DynamicRecord, right: &DynamicRecord) -> Result<bool, FieldError> {
        Ok(left.lookup(&self.name)? == right.lookup(&self.name)?)
    }

    fn assign(&self, from: &DynamicRecord, to: &mut DynamicRecord) -> Result<(), FieldError> {
        let value = from.lookup(&self.name)?.cloned().unwrap_or(Value::Null);
        to.set(&self.name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account() -> Arc<DynamicSchema> {
        DynamicSchema::new("account")
            .field("owner", FieldType::String)
            .field("balance", FieldType::Integer)
            .field("tags", FieldType::Array)
            .into_shared()
    }

    #[test]
    fn field_type_admission() {
        assert!(FieldType::Integer.admits(&json!(3)));
        assert!(!FieldType::Integer.admits(&json!(3.5)));
        assert!(FieldType::Float.admits(&json!(3)));
        assert!(FieldType::String.admits(&json!(null)));
        assert!(FieldType::Any.admits(&json!({"a": 1})));
        assert!(!FieldType::Bool.admits(&json!("true")));
    }

    #[test]
    fn schema_preserves_declaration_order() {
        let shape = account();
        assert_eq!(shape.kind(), "account");
        assert_eq!(shape.schema().field_names(), vec!["owner", "balance", "tags"]);
        assert_eq!(shape.field_type("balance"), Some(FieldType::Integer));
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let shape = DynamicSchema::new("k")
            .field("a", FieldType::Any)
            .field("b", FieldType::Any)
            .field("a", FieldType::String);
        assert_eq!(shape.schema().field_names(), vec!["a", "b"]);
        assert_eq!(shape.field_type("a"), Some(FieldType::String));
    }

    #[test]
    fn set_validates_type_and_name() {
        let mut rec = DynamicRecord::new(account());
        rec.set("balance", json!(10)).unwrap();
        assert_eq!(rec.get("balance"), Some(&json!(10)));

        let err = rec.set("balance", json!("ten")).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));

        let err = rec.set("nickname", json!("x")).unwrap_err();
        assert!(matches!(err, FieldError::UnknownField { .. }));
    }

    #[test]
    fn setting_null_clears() {
        let mut rec = DynamicRecord::new(account())
            .with("owner", json!("ana"))
            .unwrap();
        rec.set("owner", Value::Null).unwrap();
        assert!(rec.get("owner").is_none());
        assert!(rec.values().is_empty());
    }

    #[test]
    fn accessors_read_and_copy() {
        let shape = account();
        let src = DynamicRecord::new(shape.clone())
            .with_id("a-1")
            .with("owner", json!("ana"))
            .unwrap();
        let mut dst = DynamicRecord::new(shape.clone()).with_id("a-1");

        let owner = shape.schema().field_by_name("owner").unwrap();
        assert!(!owner.is_null(&src).unwrap());
        assert!(owner.is_null(&dst).unwrap());
        assert!(!owner.same_value(&src, &dst).unwrap());

        owner.assign(&src, &mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn assign_rejects_value_undeclared_type() {
        let loose = DynamicSchema::new("account")
            .field("balance", FieldType::Any)
            .into_shared();
        let strict = DynamicSchema::new("account")
            .field("balance", FieldType::Integer)
            .into_shared();
        let src = DynamicRecord::new(loose.clone())
            .with("balance", json!("lots"))
            .unwrap();
        let mut dst = DynamicRecord::new(strict);

        let balance = loose.schema().field_by_name("balance").unwrap();
        let err = balance.assign(&src, &mut dst).unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "balance".into(),
                expected: "integer".into(),
                found: "string".into(),
            }
        );
    }

    #[test]
    fn shape_compares_fields_and_types() {
        let narrow = DynamicSchema::new("account")
            .field("owner", FieldType::String)
            .into_shared();
        let a = DynamicRecord::new(account());
        let b = DynamicRecord::new(account());
        let c = DynamicRecord::new(narrow);
        let d = DynamicRecord::new(
            DynamicSchema::new("account")
                .field("owner", FieldType::String)
                .field("balance", FieldType::Float)
                .field("tags", FieldType::Array)
                .into_shared(),
        );

        assert!(a.same_shape(&a.clone()));
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert!(!a.same_shape(&d));
        assert_eq!(c.describe_shape(), "account{owner: string}");
    }

    #[test]
    fn mergeable_exposes_id_and_kind() {
        let rec = DynamicRecord::new(account()).with_id("a-9");
        assert_eq!(rec.id().map(RecordId::as_str), Some("a-9"));
        assert_eq!(rec.kind(), "account");
    }
}
