//! Technology-tier classification and relation-gated trade filtering.
//!
//! Trading partners in the host simulation should not offer their best goods
//! to strangers. This crate decides what a counterpart faction's traders
//! will stock, in two steps:
//!
//! 1. At catalog load, [`classify`] resolves every tradeable item to a
//!    [`TechTier`] through a layered fallback over weak catalog signals and
//!    produces an immutable [`TierSnapshot`].
//! 2. Per transaction, a [`TradeGate`] compares each candidate item's tier
//!    against the bracket the current goodwill falls into on the
//!    [`RelationScale`], failing open for anything unknown.
//!
//! The scale also powers the host's cache invalidation: when a goodwill
//! delta crosses a bracket boundary ([`RelationScale::goodwill_shift`]),
//! previously generated stock is stale.
//!
//! # Modules
//!
//! - [`classifier`] -- The layered tier-inference pass over the catalog
//! - [`snapshot`] -- The immutable classification result and its diagnostics
//! - [`scale`] -- Goodwill brackets and the boundary-crossing check
//! - [`filter`] -- The per-item inclusion decision and stock filtering
//! - [`config`] -- YAML-backed policy configuration
//! - [`error`] -- Error types for the configuration boundary
//!
//! # Usage
//!
//! ```
//! use caravan_policy::{ClassifierConfig, Counterpart, TradeGate, classify};
//! use caravan_types::{Catalog, ItemDefId, ItemRecord, TechTier};
//!
//! let mut rifle = ItemRecord::new("bolt_action_rifle");
//! rifle.tech_tier = TechTier::Industrial;
//! let mut rice = ItemRecord::new("rice");
//! rice.is_raw_food = true;
//! let catalog = Catalog::new(vec![rifle, rice], Vec::new());
//!
//! let snapshot = classify(&catalog, &ClassifierConfig::default());
//! let gate = TradeGate::default();
//! let counterpart = Counterpart::faction("outlander_union", 10);
//!
//! // At lukewarm goodwill the rifle is withheld, the rice is not.
//! assert!(!gate.is_included(&snapshot, &ItemDefId::new("bolt_action_rifle"), &counterpart));
//! assert!(gate.is_included(&snapshot, &ItemDefId::new("rice"), &counterpart));
//! ```
//!
//! [`TechTier`]: caravan_types::TechTier

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod scale;
pub mod snapshot;

// Re-export primary types at crate root.
pub use classifier::classify;
pub use config::{BracketConfig, ClassifierConfig, FilterConfig, PolicyConfig};
pub use error::PolicyError;
pub use filter::{Counterpart, TradeGate};
pub use scale::{BracketChange, RelationScale};
pub use snapshot::{SignalCounts, TierSignal, TierSnapshot};
