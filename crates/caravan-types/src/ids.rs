//! Type-safe identifier wrappers around catalog definition names.
//!
//! The host simulation keys every definition (items, recipes, research
//! projects, factions) by a stable `snake_case` name in its def database.
//! Each kind gets a strongly-typed wrapper here to prevent accidental mixing
//! of identifiers at compile time -- a recipe name can never be passed where
//! an item name is expected.
//!
//! Identifiers are opaque handles: this crate never parses or interprets the
//! inner string beyond equality and ordering.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a definition name with standard derives.
macro_rules! define_def_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from a definition name.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Return the definition name as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Consume the identifier and return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_def_id! {
    /// Identifier for a tradeable-item definition in the host catalog.
    ItemDefId
}

define_def_id! {
    /// Identifier for a crafting-recipe definition in the host catalog.
    RecipeDefId
}

define_def_id! {
    /// Identifier for a research-project definition in the host catalog.
    ResearchDefId
}

define_def_id! {
    /// Identifier for a faction in the host simulation.
    FactionId
}
