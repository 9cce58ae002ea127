//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

id_type!(
    /// User identifier.
    UserId
);
id_type!(
    /// Group identifier.
    GroupId
);
id_type!(
    /// Event identifier.
    EventId
);
id_type!(
    /// Message identifier.
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_roundtrip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_event_id_parse_invalid() {
        assert!("not-a-uuid".parse::<EventId>().is_err());
    }

    #[test]
    fn test_typed_ids_equality() {
        let uuid = Uuid::new_v4();
        let a = GroupId(uuid);
        let b = GroupId(uuid);
        assert_eq!(a, b);

        let c = GroupId(Uuid::new_v4());
        assert_ne!(a, c);
    }

    #[test]
    fn test_typed_ids_hash() {
        use std::collections::HashSet;

        let uuid = Uuid::new_v4();
        let mut set = HashSet::new();
        set.insert(UserId(uuid));
        assert!(set.contains(&UserId(uuid)));
    }

    #[test]
    fn test_serde_transparent() {
        let id = MessageId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
        let back: MessageId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
