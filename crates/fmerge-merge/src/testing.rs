//! Record fixtures shared by the merge tests.

use std::sync::LazyLock;

use fmerge_types::{Mergeable, RecordId, Schema};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Person {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub city: Option<String>,
}

static PERSON: LazyLock<Schema<Person>> = LazyLock::new(|| {
    Schema::<Person>::new("person")
        .field("id", |p| &p.id, |p| &mut p.id)
        .field("name", |p| &p.name, |p| &mut p.name)
        .field("age", |p| &p.age, |p| &mut p.age)
        .field("city", |p| &p.city, |p| &mut p.city)
});

impl Mergeable for Person {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn schema(&self) -> &Schema<Self> {
        &PERSON
    }
}

impl Person {
    pub(crate) fn new(id: &str, name: &str, age: i32, city: &str) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            age: Some(age),
            city: Some(city.into()),
        }
    }
}

/// A different record kind that can collide with a `Person` identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Invoice {
    pub id: Option<RecordId>,
    pub total: Option<u64>,
}

static INVOICE: LazyLock<Schema<Invoice>> = LazyLock::new(|| {
    Schema::<Invoice>::new("invoice").field("total", |i| &i.total, |i| &mut i.total)
});

impl Mergeable for Invoice {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn schema(&self) -> &Schema<Self> {
        &INVOICE
    }
}
