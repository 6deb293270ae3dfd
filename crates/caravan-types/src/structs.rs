//! Catalog record structs for the Caravan trade policy engine.
//!
//! These are read-only snapshots of the host's def database, assembled once
//! per catalog load and handed to classification. The host owns the catalog;
//! this crate only describes the attributes classification consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{MaterialClass, TechTier, Tradeability};
use crate::ids::{ItemDefId, RecipeDefId, ResearchDefId};

// ---------------------------------------------------------------------------
// Research references
// ---------------------------------------------------------------------------

/// A reference to a research project, carrying the tier of that project.
///
/// Classification only ever reads the tier; the identifier is kept for
/// diagnostics and host-side cross-referencing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRef {
    /// The referenced research-project definition.
    pub id: ResearchDefId,
    /// The technology tier of the referenced project.
    pub tier: TechTier,
}

impl ResearchRef {
    /// Create a research reference.
    pub fn new(id: impl Into<ResearchDefId>, tier: TechTier) -> Self {
        Self { id: id.into(), tier }
    }
}

// ---------------------------------------------------------------------------
// Recipe maker
// ---------------------------------------------------------------------------

/// The implicit production-recipe block an item definition may carry.
///
/// Host catalogs declare the research requirement of an item's own crafting
/// recipe in one of two shapes: a single prerequisite or a list. Both fields
/// exist side by side in the def database, so both are mirrored here; the
/// single form takes precedence when present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeMaker {
    /// The single research prerequisite, when declared in that form.
    #[serde(default)]
    pub research_prerequisite: Option<ResearchRef>,
    /// The prerequisite list, when declared in that form.
    #[serde(default)]
    pub research_prerequisites: Vec<ResearchRef>,
}

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

/// One tradeable-item definition, snapshotted from the host catalog.
///
/// Every attribute is a weak classification signal; none is required. A
/// record with nothing but an `id` is valid and resolves through the
/// classifier's fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// The item's definition name.
    pub id: ItemDefId,

    /// The tier declared directly on the definition. `Undefined` when the
    /// catalog declares none.
    #[serde(default = "TechTier::undefined")]
    pub tech_tier: TechTier,

    /// Research projects that must be finished before the item can be made.
    #[serde(default)]
    pub research_prerequisites: Vec<ResearchRef>,

    /// The item's implicit production-recipe block, when it has one.
    #[serde(default)]
    pub recipe_maker: Option<RecipeMaker>,

    /// Material categories the item may be crafted from.
    #[serde(default)]
    pub material_classes: Vec<MaterialClass>,

    /// Density of natural underground deposits of this item. `None` (or a
    /// non-positive value) means the item does not occur in deposits.
    #[serde(default)]
    pub deep_commonality: Option<Decimal>,

    /// How the item may participate in trade.
    #[serde(default)]
    pub tradeability: Tradeability,

    /// Whether the definition describes a living creature.
    #[serde(default)]
    pub is_creature: bool,
    /// Whether the item is a raw crafting material (usable as stuff).
    #[serde(default)]
    pub is_raw_material: bool,
    /// Whether the item is a plant.
    #[serde(default)]
    pub is_plant: bool,
    /// Whether the item is unprepared food.
    #[serde(default)]
    pub is_raw_food: bool,
    /// Whether the item is a prepared meal.
    #[serde(default)]
    pub is_meal: bool,
    /// Whether the item is a weapon.
    #[serde(default)]
    pub is_weapon: bool,
    /// Whether the item is wearable apparel.
    #[serde(default)]
    pub is_apparel: bool,
}

impl ItemRecord {
    /// Create a record with the given definition name and no signals set.
    ///
    /// All attributes start at their catalog defaults: no declared tier, no
    /// prerequisites, fully tradeable, no trait flags.
    pub fn new(id: impl Into<ItemDefId>) -> Self {
        Self {
            id: id.into(),
            tech_tier: TechTier::Undefined,
            research_prerequisites: Vec::new(),
            recipe_maker: None,
            material_classes: Vec::new(),
            deep_commonality: None,
            tradeability: Tradeability::All,
            is_creature: false,
            is_raw_material: false,
            is_plant: false,
            is_raw_food: false,
            is_meal: false,
            is_weapon: false,
            is_apparel: false,
        }
    }

    /// Whether any of the natural-origin traits is set: creature product,
    /// raw material, plant, unprepared food, or prepared meal.
    pub const fn is_natural_origin(&self) -> bool {
        self.is_creature || self.is_raw_material || self.is_plant || self.is_raw_food || self.is_meal
    }
}

impl TechTier {
    /// Serde default for [`ItemRecord::tech_tier`].
    const fn undefined() -> Self {
        Self::Undefined
    }
}

// ---------------------------------------------------------------------------
// Recipe records
// ---------------------------------------------------------------------------

/// One crafting-recipe definition, snapshotted from the host catalog.
///
/// Like [`RecipeMaker`], the research requirement comes in a single and a
/// list shape; the single form takes precedence when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// The recipe's definition name.
    pub id: RecipeDefId,
    /// Items this recipe produces.
    #[serde(default)]
    pub products: Vec<ItemDefId>,
    /// The single research prerequisite, when declared in that form.
    #[serde(default)]
    pub research_prerequisite: Option<ResearchRef>,
    /// The prerequisite list, when declared in that form.
    #[serde(default)]
    pub research_prerequisites: Vec<ResearchRef>,
}

impl RecipeRecord {
    /// Create a recipe with the given definition name, no products, and no
    /// research requirement.
    pub fn new(id: impl Into<RecipeDefId>) -> Self {
        Self {
            id: id.into(),
            products: Vec::new(),
            research_prerequisite: None,
            research_prerequisites: Vec::new(),
        }
    }

    /// Whether the recipe produces the given item.
    pub fn produces(&self, item: &ItemDefId) -> bool {
        self.products.iter().any(|p| p == item)
    }

    /// The highest tier among this recipe's research prerequisites, if any.
    ///
    /// The single-prerequisite form wins over the list form when both are
    /// declared, mirroring how the host def database resolves them.
    pub fn prerequisite_tier(&self) -> Option<TechTier> {
        if let Some(single) = &self.research_prerequisite {
            return Some(single.tier);
        }
        self.research_prerequisites.iter().map(|r| r.tier).max()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The full catalog snapshot handed over by the host at load time.
///
/// Immutable for the lifetime of a classification pass. The host rebuilds
/// and re-hands a fresh snapshot when its def database changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// All item definitions, tradeable or not.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    /// All crafting-recipe definitions.
    #[serde(default)]
    pub recipes: Vec<RecipeRecord>,
}

impl Catalog {
    /// Create a catalog from item and recipe lists.
    pub const fn new(items: Vec<ItemRecord>, recipes: Vec<RecipeRecord>) -> Self {
        Self { items, recipes }
    }
}
