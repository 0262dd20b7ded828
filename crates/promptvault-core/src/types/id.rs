//! Newtype wrappers around `String` for domain identifiers.
//!
//! Identifiers are opaque to the authorization layer: they come from the
//! persistence collaborator (usually UUIDs, sometimes slugs) and are only
//! ever compared for equality. Distinct types prevent passing a
//! `ResourceId` where a `PrincipalId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of an authenticated principal (a user).
    PrincipalId
);

define_id!(
    /// Identifier of a resource (prompt, tag, suggestion, favorite, approval).
    ResourceId
);
