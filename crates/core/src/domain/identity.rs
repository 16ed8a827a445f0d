// Content-derived identity types
//
// Four distinct, non-interchangeable identifier types, each wrapping a
// HashValue and constructed exclusively via `from_content`. Identities of
// different types are never comparable to each other - the Rust type system
// enforces this at compile time instead of via a tagged runtime variant.

use super::hash::{sha256, HashValue};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! content_identity {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(HashValue);

        impl $name {
            /// Construct from a content string: `sha256(content)`.
            pub fn from_content(content: impl AsRef<str>) -> Self {
                Self(sha256(content.as_ref().as_bytes()))
            }

            pub fn hash(&self) -> &HashValue {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                self.0.to_hex()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

content_identity!(JobID, "Deterministic identifier for a processing job.");
content_identity!(RunID, "Deterministic identifier for an execution run.");
content_identity!(NodeID, "Deterministic identifier for a graph node.");
content_identity!(ArtifactID, "Deterministic identifier for a processing artifact.");
