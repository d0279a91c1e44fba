//! Merge engine for FieldMerge.
//!
//! Merges two divergent copies of the same record field by field. When the
//! snapshot history holds an ancestor for the source record, each field is
//! merged three-way: a field only the source changed fast-forwards into the
//! destination, and a field both sides changed is a conflict settled by the
//! session's [`MergeConflictPolicy`]. Without an ancestor, the destination
//! adopts every source value it lacks and every other non-null source value
//! is treated as a conflict.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::LazyLock;
//! use fmerge_merge::MergeEngine;
//! use fmerge_types::{Mergeable, RecordId, Schema};
//!
//! #[derive(Clone)]
//! struct Person {
//!     id: Option<RecordId>,
//!     age: Option<u32>,
//!     city: Option<String>,
//! }
//!
//! static PERSON: LazyLock<Schema<Person>> = LazyLock::new(|| {
//!     Schema::<Person>::new("person")
//!         .field("age", |p| &p.age, |p| &mut p.age)
//!         .field("city", |p| &p.city, |p| &mut p.city)
//! });
//!
//! impl Mergeable for Person {
//!     fn id(&self) -> Option<&RecordId> {
//!         self.id.as_ref()
//!     }
//!     fn schema(&self) -> &Schema<Self> {
//!         &PERSON
//!     }
//! }
//!
//! let engine = MergeEngine::in_memory();
//! let person = Person {
//!     id: Some("42".into()),
//!     age: Some(19),
//!     city: Some("Chernivtsi".into()),
//! };
//!
//! let mut src = engine.fork(&person).unwrap();
//! let mut dst = person.clone();
//! src.city = Some("Boston".into());
//! dst.age = Some(20);
//!
//! let merged = engine.merge(&src, dst).unwrap();
//! assert_eq!(merged.age, Some(20));
//! assert_eq!(merged.city.as_deref(), Some("Boston"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod merger;
pub mod outcome;
pub mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use config::MergeConfig;
pub use engine::MergeEngine;
pub use error::{MergeError, MergeResult};
pub use merger::{Merged, Merger};
pub use outcome::{FieldMerge, FieldResolution, MergeOutcome, Side};
pub use policy::MergeConflictPolicy;
