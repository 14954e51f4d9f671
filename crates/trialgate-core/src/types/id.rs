//! Newtype wrappers around the hosting platform's integer identifiers.
//!
//! Using distinct types prevents accidentally passing a `ClientId` where a
//! `ProductId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw integer value.
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Whether this identifier could name a real platform row.
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a client account (`tblclients.id` / `tblhosting.userid`).
    ClientId
);

define_id!(
    /// Identifier of a catalog product (`tblproducts.id` / `tblhosting.packageid`).
    ProductId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::new(49).to_string(), "49");
    }

    #[test]
    fn test_client_id_from_str() {
        let id: ClientId = " 12 ".parse().expect("should parse");
        assert_eq!(id, ClientId::new(12));
        assert!("abc".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_is_assigned() {
        assert!(ProductId::new(7).is_assigned());
        assert!(!ProductId::new(0).is_assigned());
        assert!(!ProductId::new(-1).is_assigned());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ProductId::new(7)).expect("serialize");
        assert_eq!(json, "7");
        let parsed: ClientId = serde_json::from_str("3").expect("deserialize");
        assert_eq!(parsed, ClientId::new(3));
    }
}
