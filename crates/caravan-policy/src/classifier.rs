//! Technology-tier inference over the host catalog.
//!
//! Runs once per catalog load, before any trade decision is needed. Every
//! tradeable item resolves to exactly one tier through a layered fallback
//! chain over weak signals, in fixed precedence:
//!
//! 1. The universal currency exemption.
//! 2. Underground deposit density (overrides everything, including an
//!    explicit tier: items mined from deposits trade by how common the
//!    deposits are, not by the era that first refined them).
//! 3. A tier declared directly on the definition.
//! 4. The item's own research prerequisites (highest wins).
//! 5. The research requirement of the item's production-recipe block.
//! 6. Researched recipes that produce the item (highest wins, never below
//!    industrial).
//! 7. For weapons and apparel, the crafting-material heuristic.
//! 8. Natural-origin traits resolve to no tier at all.
//! 9. Anything left defaults to industrial.
//!
//! Each rule is total; the chain cannot fail. Items the catalog marks as
//! never-tradeable are skipped entirely and get no snapshot entry.

use std::collections::{BTreeMap, BTreeSet};

use caravan_types::{Catalog, ItemDefId, ItemRecord, MaterialClass, RecipeRecord, TechTier};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::snapshot::{SignalCounts, TierSignal, TierSnapshot};

/// Classify every tradeable item in the catalog.
///
/// Builds the tier map and the unrestricted set in one pass. An item is
/// unrestricted exactly when its tier resolved to [`TechTier::Undefined`]:
/// "needs no research" and "lowest tier" are the same judgement here.
///
/// The producing-recipe rule uses a product index built up front, so the
/// whole pass is linear in catalog size.
pub fn classify(catalog: &Catalog, config: &ClassifierConfig) -> TierSnapshot {
    let recipes_by_product = index_recipes_by_product(&catalog.recipes);

    let mut tiers = BTreeMap::new();
    let mut unrestricted = BTreeSet::new();
    let mut counts = SignalCounts::default();

    for item in &catalog.items {
        if !item.tradeability.is_ever_tradeable() {
            continue;
        }

        let (tier, signal) = resolve_tier(item, &recipes_by_product, config);
        counts.record(signal);
        debug!(item = %item.id, tier = ?tier, signal = ?signal, "classified item");

        if tier == TechTier::Undefined {
            unrestricted.insert(item.id.clone());
        }
        tiers.insert(item.id.clone(), tier);
    }

    info!(
        items = tiers.len(),
        unrestricted = unrestricted.len(),
        explicit = counts.explicit,
        research = counts.research,
        recipes = counts.recipe,
        weapon_apparel = counts.material,
        defaulted = counts.fallback,
        "cached technology tiers for tradeable items"
    );

    TierSnapshot {
        tiers,
        unrestricted,
        counts,
    }
}

/// Map each item to the recipes that produce it.
fn index_recipes_by_product<'a>(
    recipes: &'a [RecipeRecord],
) -> BTreeMap<&'a ItemDefId, Vec<&'a RecipeRecord>> {
    let mut index: BTreeMap<&ItemDefId, Vec<&RecipeRecord>> = BTreeMap::new();
    for recipe in recipes {
        for product in &recipe.products {
            index.entry(product).or_default().push(recipe);
        }
    }
    index
}

/// Resolve one item through the fallback chain.
fn resolve_tier(
    item: &ItemRecord,
    recipes_by_product: &BTreeMap<&ItemDefId, Vec<&RecipeRecord>>,
    config: &ClassifierConfig,
) -> (TechTier, TierSignal) {
    if item.id == config.currency_item {
        return (TechTier::Undefined, TierSignal::Currency);
    }

    if let Some(tier) = deposit_density_tier(item.deep_commonality) {
        return (tier, TierSignal::Density);
    }

    if item.tech_tier.is_era() {
        return (item.tech_tier, TierSignal::Explicit);
    }

    if let Some(tier) = item.research_prerequisites.iter().map(|r| r.tier).max() {
        return (tier, TierSignal::Research);
    }

    if let Some(maker) = &item.recipe_maker {
        if let Some(single) = &maker.research_prerequisite {
            return (single.tier, TierSignal::RecipeMaker);
        }
        if let Some(tier) = maker.research_prerequisites.iter().map(|r| r.tier).max() {
            return (tier, TierSignal::RecipeMaker);
        }
    }

    if let Some(tier) = producing_recipe_tier(&item.id, recipes_by_product) {
        return (tier, TierSignal::Recipe);
    }

    if item.is_weapon || item.is_apparel {
        if let Some(tier) = material_tier(&item.material_classes, config.extended_materials) {
            return (tier, TierSignal::Material);
        }
    }

    if item.is_natural_origin() {
        return (TechTier::Undefined, TierSignal::NaturalOrigin);
    }

    (TechTier::Industrial, TierSignal::Fallback)
}

/// Map a deposit density to a tier.
///
/// Items that occur naturally underground are gated by how common the
/// deposits are: abundant deposits mean anyone can dig them up, scarce ones
/// take deep drilling. Returns `None` when the item has no deposits, which
/// hands resolution to the rest of the chain.
fn deposit_density_tier(density: Option<Decimal>) -> Option<TechTier> {
    let density = density?;
    if density <= Decimal::ZERO {
        return None;
    }

    let abundant = Decimal::new(15, 1); // 1.5
    let scarce = Decimal::new(5, 1); // 0.5

    if density >= abundant {
        Some(TechTier::Undefined)
    } else if density >= Decimal::ONE {
        Some(TechTier::Medieval)
    } else if density >= scarce {
        Some(TechTier::Industrial)
    } else {
        Some(TechTier::Spacer)
    }
}

/// The highest prerequisite tier among recipes producing the item.
///
/// Recipes without a research requirement do not raise the bound, and a
/// researched producing recipe implies at least industrial fabrication.
/// Returns `None` when no producing recipe carries a requirement, letting
/// the item fall through to the later rules.
fn producing_recipe_tier(
    item: &ItemDefId,
    recipes_by_product: &BTreeMap<&ItemDefId, Vec<&RecipeRecord>>,
) -> Option<TechTier> {
    let recipes = recipes_by_product.get(item)?;
    recipes
        .iter()
        .filter_map(|recipe| recipe.prerequisite_tier())
        .max()
        .map(|tier| tier.max(TechTier::Industrial))
}

/// Guess a weapon's or apparel's tier from what it can be crafted from.
///
/// Buckets are checked from highest tier to lowest; the first bucket with a
/// matching material wins. Extended material categories only count when the
/// expanded-materials capability is on.
fn material_tier(classes: &[MaterialClass], extended: bool) -> Option<TechTier> {
    let usable = |class: MaterialClass| -> bool { extended || !class.is_extended() };
    let has_any = |bucket: &[MaterialClass]| -> bool {
        classes
            .iter()
            .any(|class| bucket.contains(class) && usable(*class))
    };

    if has_any(&[
        MaterialClass::RareMetallic,
        MaterialClass::Precious,
        MaterialClass::HighTech,
    ]) {
        return Some(TechTier::Spacer);
    }
    if has_any(&[
        MaterialClass::Metallic,
        MaterialClass::SolidMetallic,
        MaterialClass::HeavyMetallic,
    ]) {
        return Some(TechTier::Industrial);
    }
    if has_any(&[
        MaterialClass::Fabric,
        MaterialClass::Leathery,
        MaterialClass::StrongMetallic,
        MaterialClass::RuggedMetallic,
    ]) {
        return Some(TechTier::Medieval);
    }
    if has_any(&[
        MaterialClass::Woody,
        MaterialClass::Stony,
        MaterialClass::WoodLogs,
    ]) {
        return Some(TechTier::Neolithic);
    }
    None
}

#[cfg(test)]
mod tests {
    use caravan_types::{RecipeMaker, ResearchRef, Tradeability};
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    fn classify_one(item: ItemRecord, recipes: Vec<RecipeRecord>) -> TierSnapshot {
        classify(&Catalog::new(vec![item], recipes), &config())
    }

    fn tier_in(snapshot: &TierSnapshot, id: &str) -> Option<TechTier> {
        snapshot.tier_of(&ItemDefId::new(id))
    }

    #[test]
    fn currency_is_always_undefined_and_unrestricted() {
        let mut silver = ItemRecord::new("silver");
        silver.tech_tier = TechTier::Ultra;
        let snapshot = classify_one(silver, Vec::new());
        assert_eq!(tier_in(&snapshot, "silver"), Some(TechTier::Undefined));
        assert!(snapshot.is_unrestricted(&ItemDefId::new("silver")));
        assert_eq!(snapshot.counts().currency, 1);
    }

    #[test]
    fn deposit_density_thresholds() {
        let cases = [
            (dec!(1.5), TechTier::Undefined),
            (dec!(2.0), TechTier::Undefined),
            (dec!(1.0), TechTier::Medieval),
            (dec!(1.2), TechTier::Medieval),
            (dec!(0.5), TechTier::Industrial),
            (dec!(0.9), TechTier::Industrial),
            (dec!(0.1), TechTier::Spacer),
        ];
        for (density, expected) in cases {
            assert_eq!(deposit_density_tier(Some(density)), Some(expected));
        }
    }

    #[test]
    fn zero_or_absent_density_is_no_signal() {
        assert_eq!(deposit_density_tier(None), None);
        assert_eq!(deposit_density_tier(Some(Decimal::ZERO)), None);
        assert_eq!(deposit_density_tier(Some(dec!(-1.0))), None);
    }

    #[test]
    fn density_overrides_explicit_tier() {
        let mut jade = ItemRecord::new("jade");
        jade.tech_tier = TechTier::Ultra;
        jade.deep_commonality = Some(dec!(1.0));
        let snapshot = classify_one(jade, Vec::new());
        assert_eq!(tier_in(&snapshot, "jade"), Some(TechTier::Medieval));
        assert_eq!(snapshot.counts().density, 1);
    }

    #[test]
    fn explicit_tier_returned_exactly() {
        let mut visor = ItemRecord::new("targeting_visor");
        visor.tech_tier = TechTier::Spacer;
        let snapshot = classify_one(visor, Vec::new());
        assert_eq!(tier_in(&snapshot, "targeting_visor"), Some(TechTier::Spacer));
        assert_eq!(snapshot.counts().explicit, 1);
    }

    #[test]
    fn animal_placeholder_is_not_an_explicit_signal() {
        let mut wool = ItemRecord::new("wool");
        wool.tech_tier = TechTier::Animal;
        wool.is_raw_material = true;
        let snapshot = classify_one(wool, Vec::new());
        // Falls through the chain to natural origin.
        assert_eq!(tier_in(&snapshot, "wool"), Some(TechTier::Undefined));
        assert_eq!(snapshot.counts().natural_origin, 1);
    }

    #[test]
    fn research_prerequisites_take_maximum() {
        let mut vest = ItemRecord::new("shield_vest");
        vest.research_prerequisites = vec![
            ResearchRef::new("smithing", TechTier::Medieval),
            ResearchRef::new("shields", TechTier::Spacer),
        ];
        let snapshot = classify_one(vest, Vec::new());
        assert_eq!(tier_in(&snapshot, "shield_vest"), Some(TechTier::Spacer));
        assert_eq!(snapshot.counts().research, 1);
    }

    #[test]
    fn recipe_maker_single_prerequisite_wins() {
        let mut stove = ItemRecord::new("electric_stove");
        stove.recipe_maker = Some(RecipeMaker {
            research_prerequisite: Some(ResearchRef::new("electricity", TechTier::Industrial)),
            research_prerequisites: vec![ResearchRef::new("starflight", TechTier::Ultra)],
        });
        let snapshot = classify_one(stove, Vec::new());
        assert_eq!(tier_in(&snapshot, "electric_stove"), Some(TechTier::Industrial));
        assert_eq!(snapshot.counts().recipe_maker, 1);
    }

    #[test]
    fn recipe_maker_list_takes_maximum() {
        let mut lamp = ItemRecord::new("sun_lamp");
        lamp.recipe_maker = Some(RecipeMaker {
            research_prerequisite: None,
            research_prerequisites: vec![
                ResearchRef::new("electricity", TechTier::Industrial),
                ResearchRef::new("hydroponics", TechTier::Spacer),
            ],
        });
        let snapshot = classify_one(lamp, Vec::new());
        assert_eq!(tier_in(&snapshot, "sun_lamp"), Some(TechTier::Spacer));
    }

    #[test]
    fn empty_recipe_maker_falls_through() {
        let mut bowl = ItemRecord::new("wooden_bowl");
        bowl.recipe_maker = Some(RecipeMaker::default());
        let snapshot = classify_one(bowl, Vec::new());
        assert_eq!(tier_in(&snapshot, "wooden_bowl"), Some(TechTier::Industrial));
        assert_eq!(snapshot.counts().fallback, 1);
    }

    #[test]
    fn producing_recipe_sets_tier_with_industrial_floor() {
        let mut herbal = ItemRecord::new("penoxycyline");
        herbal.tech_tier = TechTier::Undefined;
        let mut low = RecipeRecord::new("brew_penoxycyline");
        low.products = vec![ItemDefId::new("penoxycyline")];
        low.research_prerequisite = Some(ResearchRef::new("brewing", TechTier::Medieval));
        let snapshot = classify_one(herbal, vec![low]);
        // A researched producing recipe implies at least industrial
        // fabrication, even when the research itself is older.
        assert_eq!(tier_in(&snapshot, "penoxycyline"), Some(TechTier::Industrial));
        assert_eq!(snapshot.counts().recipe, 1);
    }

    #[test]
    fn producing_recipes_take_maximum_across_recipes() {
        let item = ItemRecord::new("component_advanced");
        let mut fab = RecipeRecord::new("fabricate_component");
        fab.products = vec![ItemDefId::new("component_advanced")];
        fab.research_prerequisites = vec![ResearchRef::new("fabrication", TechTier::Spacer)];
        let mut assemble = RecipeRecord::new("assemble_component");
        assemble.products = vec![ItemDefId::new("component_advanced")];
        assemble.research_prerequisite =
            Some(ResearchRef::new("machining", TechTier::Industrial));
        let snapshot = classify_one(item, vec![fab, assemble]);
        assert_eq!(
            tier_in(&snapshot, "component_advanced"),
            Some(TechTier::Spacer)
        );
    }

    #[test]
    fn unresearched_producing_recipes_fall_through() {
        let mut berries = ItemRecord::new("berry_jam");
        berries.is_meal = true;
        let mut cook = RecipeRecord::new("cook_berry_jam");
        cook.products = vec![ItemDefId::new("berry_jam")];
        let snapshot = classify_one(berries, vec![cook]);
        // The recipe carries no research, so the natural-origin rule wins.
        assert_eq!(tier_in(&snapshot, "berry_jam"), Some(TechTier::Undefined));
        assert_eq!(snapshot.counts().natural_origin, 1);
    }

    #[test]
    fn material_buckets_for_weapons() {
        let cases = [
            (MaterialClass::Metallic, TechTier::Industrial),
            (MaterialClass::Fabric, TechTier::Medieval),
            (MaterialClass::Leathery, TechTier::Medieval),
            (MaterialClass::Woody, TechTier::Neolithic),
            (MaterialClass::Stony, TechTier::Neolithic),
        ];
        for (class, expected) in cases {
            let mut club = ItemRecord::new("club");
            club.is_weapon = true;
            club.material_classes = vec![class];
            let snapshot = classify_one(club, Vec::new());
            assert_eq!(tier_in(&snapshot, "club"), Some(expected));
        }
    }

    #[test]
    fn highest_material_bucket_wins() {
        let mut knife = ItemRecord::new("knife");
        knife.is_weapon = true;
        knife.material_classes = vec![MaterialClass::Woody, MaterialClass::Metallic];
        let snapshot = classify_one(knife, Vec::new());
        assert_eq!(tier_in(&snapshot, "knife"), Some(TechTier::Industrial));
    }

    #[test]
    fn extended_materials_require_the_capability() {
        let mut blade = ItemRecord::new("mono_blade");
        blade.is_weapon = true;
        blade.material_classes = vec![MaterialClass::HighTech];

        let plain = classify(&Catalog::new(vec![blade.clone()], Vec::new()), &config());
        // Without the capability the extended class is invisible and the
        // item falls through to the industrial default.
        assert_eq!(tier_in(&plain, "mono_blade"), Some(TechTier::Industrial));
        assert_eq!(plain.counts().fallback, 1);

        let expanded = ClassifierConfig {
            extended_materials: true,
            ..ClassifierConfig::default()
        };
        let extended = classify(&Catalog::new(vec![blade], Vec::new()), &expanded);
        assert_eq!(tier_in(&extended, "mono_blade"), Some(TechTier::Spacer));
        assert_eq!(extended.counts().material, 1);
    }

    #[test]
    fn material_heuristic_only_applies_to_weapons_and_apparel() {
        let mut sculpture = ItemRecord::new("sculpture");
        sculpture.material_classes = vec![MaterialClass::Woody];
        let snapshot = classify_one(sculpture, Vec::new());
        assert_eq!(tier_in(&snapshot, "sculpture"), Some(TechTier::Industrial));
    }

    #[test]
    fn natural_origin_items_are_unrestricted() {
        let mut cow = ItemRecord::new("milk");
        cow.is_creature = true;
        let snapshot = classify_one(cow, Vec::new());
        assert_eq!(tier_in(&snapshot, "milk"), Some(TechTier::Undefined));
        assert!(snapshot.is_unrestricted(&ItemDefId::new("milk")));
    }

    #[test]
    fn signalless_item_defaults_to_industrial() {
        let snapshot = classify_one(ItemRecord::new("chemfuel"), Vec::new());
        assert_eq!(tier_in(&snapshot, "chemfuel"), Some(TechTier::Industrial));
        assert!(!snapshot.is_unrestricted(&ItemDefId::new("chemfuel")));
        assert_eq!(snapshot.counts().fallback, 1);
    }

    #[test]
    fn never_tradeable_items_get_no_entry() {
        let mut wall = ItemRecord::new("ancient_wall");
        wall.tradeability = Tradeability::None;
        let snapshot = classify_one(wall, Vec::new());
        assert_eq!(tier_in(&snapshot, "ancient_wall"), None);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.counts().total(), 0);
    }

    #[test]
    fn unrestricted_set_is_exactly_the_undefined_entries() {
        let mut rice = ItemRecord::new("rice");
        rice.is_raw_food = true;
        let mut rifle = ItemRecord::new("rifle");
        rifle.tech_tier = TechTier::Industrial;
        let catalog = Catalog::new(vec![rice, rifle], Vec::new());
        let snapshot = classify(&catalog, &config());

        for (id, tier) in snapshot.iter() {
            assert_eq!(snapshot.is_unrestricted(id), tier == TechTier::Undefined);
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let mut rice = ItemRecord::new("rice");
        rice.is_raw_food = true;
        let mut visor = ItemRecord::new("visor");
        visor.tech_tier = TechTier::Spacer;
        let mut recipe = RecipeRecord::new("make_visor");
        recipe.products = vec![ItemDefId::new("visor")];
        recipe.research_prerequisite = Some(ResearchRef::new("optics", TechTier::Spacer));
        let catalog = Catalog::new(vec![rice, visor], vec![recipe]);

        let first = classify(&catalog, &config());
        let second = classify(&catalog, &config());
        assert_eq!(first, second);
    }
}
