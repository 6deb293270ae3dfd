//! Enumeration types for the Caravan trade policy engine.
//!
//! Covers the technology-tier ladder, crafting-material categories, and the
//! catalog tradeability marker.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Technology tiers
// ---------------------------------------------------------------------------

/// The technology tier of an item, ordered from primitive to peak.
///
/// The derived total order is the sole basis for trade gating: an item is
/// offered when its tier is less than or equal to the tier allowed by the
/// current relationship bracket.
///
/// `Undefined` doubles as the "no research required" tier: items resolved to
/// it are exempt from relationship gating entirely. `Animal` is a placeholder
/// the host catalog uses for living creatures; the classifier never assigns
/// it and never trusts it as an explicit declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TechTier {
    /// No technological era -- raw materials, produce, and other items
    /// obtainable without any research.
    Undefined,
    /// Catalog placeholder for living creatures. Never assigned by
    /// classification.
    Animal,
    /// Stone tools, hand weapons, simple clothing.
    Neolithic,
    /// Smithing, tailoring, pre-industrial craftsmanship.
    Medieval,
    /// Machining, firearms, factory goods.
    Industrial,
    /// Spaceflight-era fabrication and advanced materials.
    Spacer,
    /// Peak technology: glitterworld artifacts and the like.
    Ultra,
}

impl TechTier {
    /// Whether this tier names a concrete technological era.
    ///
    /// False for the `Undefined` and `Animal` placeholders, which carry no
    /// classification signal of their own.
    pub const fn is_era(self) -> bool {
        !matches!(self, Self::Undefined | Self::Animal)
    }
}

// ---------------------------------------------------------------------------
// Crafting-material categories
// ---------------------------------------------------------------------------

/// A category of crafting material an item may be made from.
///
/// The base categories exist in every host configuration. The extended
/// categories only exist when the host runs with an expanded-materials
/// module, and are ignored by classification unless that capability is
/// enabled at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialClass {
    // --- Base categories ---
    /// Timber and other worked wood.
    Woody,
    /// Stone blocks and minerals.
    Stony,
    /// Woven textiles.
    Fabric,
    /// Tanned hides.
    Leathery,
    /// Common workable metals.
    Metallic,

    // --- Extended categories (expanded-materials hosts only) ---
    /// Unprocessed felled logs.
    WoodLogs,
    /// Strong mid-grade alloys.
    StrongMetallic,
    /// Rugged mid-grade alloys.
    RuggedMetallic,
    /// Dense structural metals.
    SolidMetallic,
    /// Heavy industrial metals.
    HeavyMetallic,
    /// Rare high-grade metals.
    RareMetallic,
    /// Precious metals and gemstones.
    Precious,
    /// High-tech composite materials.
    HighTech,
}

impl MaterialClass {
    /// Whether this category only exists under the expanded-materials
    /// capability.
    pub const fn is_extended(self) -> bool {
        !matches!(
            self,
            Self::Woody | Self::Stony | Self::Fabric | Self::Leathery | Self::Metallic
        )
    }
}

// ---------------------------------------------------------------------------
// Tradeability
// ---------------------------------------------------------------------------

/// How an item may participate in trade, as declared by the host catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tradeability {
    /// Never appears in trade in either direction. Such items are skipped
    /// by classification and never generated as stock.
    None,
    /// The player may sell it to traders, but traders never stock it.
    Sellable,
    /// Traders may stock it, but the player cannot sell it back.
    Buyable,
    /// Fully tradeable in both directions.
    #[default]
    All,
}

impl Tradeability {
    /// Whether the item can ever appear in a trade, in any direction.
    pub const fn is_ever_tradeable(self) -> bool {
        !matches!(self, Self::None)
    }
}
