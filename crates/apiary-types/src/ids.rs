//! Identifier wrappers.
//!
//! Players are identified by a [`Uuid`]. Alleles and mutations are
//! identified by stable string keys (for example `apiary.speciesForest`)
//! because they are declared by content definitions, not generated at
//! runtime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player owning housings and a breeding tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Generates a newtype wrapper around a string key with standard derives.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a key from anything string-like.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(String::from(key))
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_key! {
    /// Stable identifier of an allele in the allele registry.
    AlleleUid
}

define_key! {
    /// Stable identifier of an entry in the mutation table.
    MutationId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn keys_serialize_as_plain_strings() {
        let uid = AlleleUid::new("apiary.speciesForest");
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"apiary.speciesForest\"");
        let back: AlleleUid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
    }

    #[test]
    fn player_ids_are_unique() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }
}
