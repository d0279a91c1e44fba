//! Foundation types for FieldMerge.
//!
//! Every other FieldMerge crate depends on `fmerge-types`. It defines what a
//! mergeable record looks like without any runtime reflection: a record
//! exposes an optional identifier and an ordered [`Schema`] of named field
//! accessors, each able to test its value for null, compare it null-safely,
//! and copy it from one record to another.
//!
//! # Key Types
//!
//! - [`RecordId`] — Opaque identifier correlating copies of the same record
//! - [`Mergeable`] — Contract implemented by every record type
//! - [`Schema`] / [`FieldAccess`] — Ordered field accessors built once per type
//! - [`FieldValue`] — Nullability of a single field value
//! - [`DynamicRecord`] / [`DynamicSchema`] — Records whose shape is only known at runtime

pub mod dynamic;
pub mod error;
pub mod id;
pub mod record;
pub mod schema;
pub mod value;

pub use dynamic::{DynamicRecord, DynamicSchema, FieldType};
pub use error::FieldError;
pub use id::RecordId;
pub use record::Mergeable;
pub use schema::{FieldAccess, Schema, TypedField};
pub use value::FieldValue;
