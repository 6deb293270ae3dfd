//! The immutable classification snapshot shared with the trade filter.
//!
//! A [`TierSnapshot`] is built once per catalog load and never mutated
//! afterwards; the host replaces it wholesale when the catalog changes (for
//! example after mid-session research unlocks new defs). All reads are
//! `&self`, so a snapshot can be shared across concurrent readers without
//! locking.

use std::collections::{BTreeMap, BTreeSet};

use caravan_types::{ItemDefId, TechTier};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Classification signals
// ---------------------------------------------------------------------------

/// Which rule of the fallback chain resolved an item's tier.
///
/// Purely diagnostic: the resolved tier is authoritative, the signal only
/// feeds [`SignalCounts`] and per-item debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierSignal {
    /// The universal currency exemption.
    Currency,
    /// The underground deposit density thresholds.
    Density,
    /// A tier declared directly on the definition.
    Explicit,
    /// The item's own research prerequisite list.
    Research,
    /// The item's implicit production-recipe block.
    RecipeMaker,
    /// A researched recipe that produces the item.
    Recipe,
    /// The crafting-material heuristic for weapons and apparel.
    Material,
    /// The natural-origin traits (creature, raw material, plant, food).
    NaturalOrigin,
    /// No signal applied; the industrial default was used.
    Fallback,
}

/// Per-signal tallies from one classification pass.
///
/// Process-lifetime diagnostics with no external format guarantee; logged
/// once per pass and kept on the snapshot for inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    /// Items resolved by the currency exemption.
    pub currency: u32,
    /// Items resolved by deposit density.
    pub density: u32,
    /// Items resolved by an explicit tier declaration.
    pub explicit: u32,
    /// Items resolved by direct research prerequisites.
    pub research: u32,
    /// Items resolved by their production-recipe block.
    pub recipe_maker: u32,
    /// Items resolved by a researched producing recipe.
    pub recipe: u32,
    /// Items resolved by the material heuristic.
    pub material: u32,
    /// Items resolved as natural-origin.
    pub natural_origin: u32,
    /// Items that fell through to the industrial default.
    pub fallback: u32,
}

impl SignalCounts {
    /// Tally one resolved item under the signal that resolved it.
    pub const fn record(&mut self, signal: TierSignal) {
        let slot = match signal {
            TierSignal::Currency => &mut self.currency,
            TierSignal::Density => &mut self.density,
            TierSignal::Explicit => &mut self.explicit,
            TierSignal::Research => &mut self.research,
            TierSignal::RecipeMaker => &mut self.recipe_maker,
            TierSignal::Recipe => &mut self.recipe,
            TierSignal::Material => &mut self.material,
            TierSignal::NaturalOrigin => &mut self.natural_origin,
            TierSignal::Fallback => &mut self.fallback,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total number of items tallied.
    pub const fn total(&self) -> u32 {
        self.currency
            .saturating_add(self.density)
            .saturating_add(self.explicit)
            .saturating_add(self.research)
            .saturating_add(self.recipe_maker)
            .saturating_add(self.recipe)
            .saturating_add(self.material)
            .saturating_add(self.natural_origin)
            .saturating_add(self.fallback)
    }
}

// ---------------------------------------------------------------------------
// TierSnapshot
// ---------------------------------------------------------------------------

/// The classification result for one catalog load: every tradeable item's
/// resolved tier, plus the set of items exempt from relationship gating.
///
/// Invariants, upheld by the classifier:
/// - every tradeable catalog item has exactly one tier entry;
/// - `unrestricted` holds exactly the items whose tier resolved to
///   [`TechTier::Undefined`];
/// - rebuilding from an unchanged catalog yields an equal snapshot (all
///   containers are ordered).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSnapshot {
    pub(crate) tiers: BTreeMap<ItemDefId, TechTier>,
    pub(crate) unrestricted: BTreeSet<ItemDefId>,
    pub(crate) counts: SignalCounts,
}

impl TierSnapshot {
    /// The resolved tier of an item, or `None` for items the snapshot has
    /// never seen (untracked defs, or a catalog newer than this snapshot).
    pub fn tier_of(&self, item: &ItemDefId) -> Option<TechTier> {
        self.tiers.get(item).copied()
    }

    /// Whether the item is exempt from relationship gating.
    pub fn is_unrestricted(&self, item: &ItemDefId) -> bool {
        self.unrestricted.contains(item)
    }

    /// Number of classified items.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the snapshot contains no items.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Number of unrestricted items.
    pub fn unrestricted_len(&self) -> usize {
        self.unrestricted.len()
    }

    /// The per-signal diagnostics gathered while building this snapshot.
    pub const fn counts(&self) -> &SignalCounts {
        &self.counts
    }

    /// Iterate over all classified items and their tiers, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemDefId, TechTier)> {
        self.tiers.iter().map(|(id, tier)| (id, *tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TierSnapshot {
        let mut tiers = BTreeMap::new();
        tiers.insert(ItemDefId::new("rice"), TechTier::Undefined);
        tiers.insert(ItemDefId::new("rifle"), TechTier::Industrial);
        let mut unrestricted = BTreeSet::new();
        unrestricted.insert(ItemDefId::new("rice"));
        TierSnapshot {
            tiers,
            unrestricted,
            counts: SignalCounts::default(),
        }
    }

    #[test]
    fn tier_lookup_hits_and_misses() {
        let snapshot = sample();
        assert_eq!(
            snapshot.tier_of(&ItemDefId::new("rifle")),
            Some(TechTier::Industrial)
        );
        assert_eq!(snapshot.tier_of(&ItemDefId::new("unknown")), None);
    }

    #[test]
    fn unrestricted_membership() {
        let snapshot = sample();
        assert!(snapshot.is_unrestricted(&ItemDefId::new("rice")));
        assert!(!snapshot.is_unrestricted(&ItemDefId::new("rifle")));
        assert_eq!(snapshot.unrestricted_len(), 1);
    }

    #[test]
    fn counts_record_and_total() {
        let mut counts = SignalCounts::default();
        counts.record(TierSignal::Explicit);
        counts.record(TierSignal::Explicit);
        counts.record(TierSignal::Fallback);
        assert_eq!(counts.explicit, 2);
        assert_eq!(counts.fallback, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn snapshot_roundtrip_serde() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).ok();
        assert!(json.is_some());
        let restored: Result<TierSnapshot, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(snapshot));
    }
}
