//! Strongly-typed ID wrappers for ledger entities
//!
//! Newtypes keep transaction ids and recurring template ids apart at compile
//! time. Display uses a short prefixed form (`txn-1a2b3c4d`) that the CLI
//! accepts back through `matches_short`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

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

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether a user-supplied identifier refers to this ID
            ///
            /// Accepts the full UUID, the prefixed short form shown in
            /// listings, or any unprefixed hex prefix of at least 4 chars.
            pub fn matches_short(&self, identifier: &str) -> bool {
                let identifier = identifier.trim().to_lowercase();
                let bare = identifier
                    .strip_prefix($display_prefix)
                    .unwrap_or(&identifier);
                bare.len() >= 4 && self.0.to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
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
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(RecurringId, "rec-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_parse_full_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: RecurringId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: RecurringId = format!("rec-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_matches_short() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches_short("txn-550e8400"));
        assert!(id.matches_short("550e"));
        assert!(id.matches_short("TXN-550E8400"));
        assert!(!id.matches_short("txn-"));
        assert!(!id.matches_short("550"));
        assert!(!id.matches_short("txn-deadbeef"));
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
