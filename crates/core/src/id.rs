//! Stable identifiers for tracked modules.

use serde::{Deserialize, Serialize};

/// Identifier of a module, unique across the whole collection.
///
/// Seeded ids take the form `{course_code}-{index}`; persisted and imported
/// ids are kept exactly as they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the seed id for the module at `index` within `course_code`.
    pub fn derive(course_code: &str, index: usize) -> Self {
        Self(format!("{}-{}", course_code, index))
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_joins_code_and_index() {
        assert_eq!(ModuleId::derive("IT3101", 0).as_str(), "IT3101-0");
        assert_eq!(ModuleId::derive("C1", 12).to_string(), "C1-12");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ModuleId::new("C1-3")).unwrap();
        assert_eq!(json, "\"C1-3\"");
        let back: ModuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ModuleId::new("C1-3"));
    }
}
