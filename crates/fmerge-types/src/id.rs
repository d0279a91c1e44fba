use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier shared by every copy of the same logical record.
///
/// The identifier is used both to check that two copies share an origin and
/// to key the snapshot history. Its contents are never interpreted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_token() {
        let id = RecordId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "RecordId(42)");
    }

    #[test]
    fn conversions_agree() {
        assert_eq!(RecordId::from("abc"), RecordId::from("abc".to_string()));
        assert_eq!(RecordId::new("abc").into_inner(), "abc");
    }

    #[test]
    fn serde_is_transparent() {
        let id = RecordId::new("order-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order-7\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
