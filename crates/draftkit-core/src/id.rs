//! Opaque identifiers shared by both draft documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An opaque, globally unique identifier.
///
/// Rendered as an upper-case hyphenated UUID, which is the form the host
/// application writes itself. The empty identifier is only used by record
/// templates before a reference is filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string().to_uppercase())
    }

    /// Get the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the unset (empty) identifier.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique_uppercase_uuids() {
        let ids: HashSet<ObjectId> = (0..256).map(|_| ObjectId::generate()).collect();
        assert_eq!(ids.len(), 256);

        for id in &ids {
            assert_eq!(id.as_str().len(), 36);
            assert_eq!(id.as_str(), id.as_str().to_uppercase());
            assert!(Uuid::parse_str(id.as_str()).is_ok());
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ObjectId::from("ABC");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ABC\"");
        assert!(ObjectId::default().is_empty());
    }
}
