//! Strongly-typed ID wrappers for persisted entities
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short display form, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether a user-typed identifier refers to this ID
            ///
            /// Accepts the full UUID, the short display form, or a prefix of
            /// the UUID with or without the display prefix.
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim().to_ascii_lowercase();
                let stripped = identifier
                    .strip_prefix($display_prefix)
                    .unwrap_or(&identifier);
                if stripped.is_empty() {
                    return false;
                }
                self.0.to_string().starts_with(stripped)
                    || self.0.simple().to_string().starts_with(stripped)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ExpenseId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: ExpenseId = format!("exp-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_matches_short_form() {
        let id: ExpenseId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches("exp-550e8400"));
        assert!(id.matches("550e84"));
        assert!(id.matches("EXP-550E8400"));
        assert!(!id.matches("exp-"));
        assert!(!id.matches("exp-deadbeef"));
    }
}
