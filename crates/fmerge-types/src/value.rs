//! Nullability of field values.
//!
//! The merge rules distinguish an absent (null) field from a present one.
//! [`FieldValue`] gives every field type a uniform way to answer that
//! question; equality is the type's own `PartialEq`, which for `Option<T>`
//! and `serde_json::Value` is already null-safe (null equals null, null never
//! equals a present value).

use serde_json::Value;

/// A value that can be stored in a mergeable field.
pub trait FieldValue: Clone + PartialEq + Send + Sync + 'static {
    /// Whether the value is absent.
    fn is_null(&self) -> bool;
}

impl<T> FieldValue for Option<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl FieldValue for Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn is_null(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_null!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);
