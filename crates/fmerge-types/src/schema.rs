//! Field accessor schemas.
//!
//! A [`Schema`] is the ordered list of fields a record type exposes to the
//! merge engine. It is built once per type and replaces runtime introspection:
//! each entry knows how to test its field for null, compare it between two
//! records, and copy it from one record into another.

use std::fmt;

use crate::error::FieldError;
use crate::value::FieldValue;

/// Generic access to one named field of records of type `R`.
///
/// Implementations must be order-stable and side-effect free apart from
/// [`assign`](FieldAccess::assign).
pub trait FieldAccess<R>: Send + Sync {
    /// The field name, unique within its schema.
    fn name(&self) -> &str;

    /// Whether the field is absent on `record`.
    fn is_null(&self, record: &R) -> Result<bool, FieldError>;

    /// Null-safe equality of this field between two records.
    fn same_value(&self, left: &R, right: &R) -> Result<bool, FieldError>;

    /// Copy this field's value from `from` into `to`.
    fn assign(&self, from: &R, to: &mut R) -> Result<(), FieldError>;
}

/// A statically typed field reached through a pair of projection functions.
pub struct TypedField<R, T> {
    name: &'static str,
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T> TypedField<R, T> {
    pub fn new(name: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        Self { name, get, get_mut }
    }
}

impl<R, T: FieldValue> FieldAccess<R> for TypedField<R, T> {
    fn name(&self) -> &str {
        self.name
    }

    fn is_null(&self, record: &R) -> Result<bool, FieldError> {
        Ok((self.get)(record).is_null())
    }

    fn same_value(&self, left: &R, right: &R) -> Result<bool, FieldError> {
        Ok((self.get)(left) == (self.get)(right))
    }

    fn assign(&self, from: &R, to: &mut R) -> Result<(), FieldError> {
        *(self.get_mut)(to) = (self.get)(from).clone();
        Ok(())
    }
}

/// The ordered field set of a record shape.
///
/// ```rust
/// use fmerge_types::Schema;
///
/// #[derive(Clone)]
/// struct Person {
///     name: Option<String>,
///     age: Option<u32>,
/// }
///
/// let schema = Schema::<Person>::new("person")
///     .field("name", |p| &p.name, |p| &mut p.name)
///     .field("age", |p| &p.age, |p| &mut p.age);
/// assert_eq!(schema.field_names(), vec!["name", "age"]);
/// ```
pub struct Schema<R> {
    kind: String,
    fields: Vec<Box<dyn FieldAccess<R>>>,
}

impl<R: 'static> Schema<R> {
    /// Create an empty schema for the record kind `kind`.
    ///
    /// The kind names the shape: two records are merge-compatible only when
    /// their schemas share a kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Append a typed field.
    pub fn field<T: FieldValue>(
        self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        self.with_accessor(TypedField::new(name, get, get_mut))
    }

    /// Append a custom accessor.
    pub fn with_accessor(mut self, accessor: impl FieldAccess<R> + 'static) -> Self {
        self.fields.push(Box::new(accessor));
        self
    }
}

impl<R> Schema<R> {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldAccess<R>> + '_ {
        self.fields.iter().map(|f| f.as_ref())
    }

    /// Look up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&dyn FieldAccess<R>> {
        self.fields().find(|f| f.name() == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields().map(|f| f.name()).collect()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind)
            .field("fields", &self.field_names())
            .finish()
    }
}
