//! Shared type definitions for the Caravan trade policy engine.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the host simulation and the policy engine: typed
//! definition identifiers, the technology-tier ladder, and the read-only
//! catalog records classification consumes.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for catalog definition names
//! - [`enums`] -- Enumeration types (tiers, material categories, tradeability)
//! - [`structs`] -- Catalog record structs (items, recipes, research refs)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{MaterialClass, TechTier, Tradeability};
pub use ids::{FactionId, ItemDefId, RecipeDefId, ResearchDefId};
pub use structs::{Catalog, ItemRecord, RecipeMaker, RecipeRecord, ResearchRef};
