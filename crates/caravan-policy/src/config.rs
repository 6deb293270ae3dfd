//! Configuration loading and typed config structures for the trade policy.
//!
//! The host ships a `caravan-policy.yaml` alongside its own configuration.
//! This module defines strongly-typed structs that mirror the YAML structure
//! and provides a loader that reads and validates the file. Every field has
//! a default matching the canonical policy constants, so an empty file (or
//! no file at all) yields a working configuration.

use std::path::Path;

use caravan_types::{ItemDefId, TechTier};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Top-level trade policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Classifier settings (currency exemption, material capability).
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Relationship bracket lower bounds.
    #[serde(default)]
    pub brackets: BracketConfig,

    /// Trade filter settings.
    #[serde(default)]
    pub filter: FilterConfig,
}

impl PolicyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Io`] if the file cannot be read,
    /// [`PolicyError::Yaml`] if the content is not valid YAML, or
    /// [`PolicyError::NonMonotonicBrackets`] if the bracket bounds do not
    /// strictly ascend.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Yaml`] if the string is not valid YAML, or
    /// [`PolicyError::NonMonotonicBrackets`] if the bracket bounds do not
    /// strictly ascend.
    pub fn parse(yaml: &str) -> Result<Self, PolicyError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.brackets.validate()?;
        Ok(config)
    }
}

/// Classifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// The universal currency item, exempt from tier inference and always
    /// freely tradeable.
    #[serde(default = "default_currency_item")]
    pub currency_item: ItemDefId,

    /// Whether the host runs with an expanded-materials module, enabling
    /// the extended material categories as classification signals.
    #[serde(default)]
    pub extended_materials: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            currency_item: default_currency_item(),
            extended_materials: false,
        }
    }
}

/// Inclusive lower bounds of the relationship brackets, one per gated tier.
///
/// The bounds partition the whole goodwill domain into six contiguous
/// brackets: everything below the `neolithic` bound falls into the
/// `Undefined` bracket, and each named bound starts its tier's bracket.
/// Bounds must strictly ascend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Goodwill from which neolithic-tier items are offered.
    #[serde(default = "default_neolithic_floor")]
    pub neolithic: i32,
    /// Goodwill from which medieval-tier items are offered.
    #[serde(default = "default_medieval_floor")]
    pub medieval: i32,
    /// Goodwill from which industrial-tier items are offered.
    #[serde(default = "default_industrial_floor")]
    pub industrial: i32,
    /// Goodwill from which spacer-tier items are offered.
    #[serde(default = "default_spacer_floor")]
    pub spacer: i32,
    /// Goodwill from which ultra-tier items are offered.
    #[serde(default = "default_ultra_floor")]
    pub ultra: i32,
}

impl BracketConfig {
    /// The bracket floors paired with their tiers, in ascending tier order.
    pub const fn floors(&self) -> [(TechTier, i32); 5] {
        [
            (TechTier::Neolithic, self.neolithic),
            (TechTier::Medieval, self.medieval),
            (TechTier::Industrial, self.industrial),
            (TechTier::Spacer, self.spacer),
            (TechTier::Ultra, self.ultra),
        ]
    }

    /// Check that the floors strictly ascend with tier, so the brackets
    /// partition the goodwill domain without overlap or gaps.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NonMonotonicBrackets`] naming the first tier
    /// whose floor is not above its predecessor's.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let floors = self.floors();
        let mut pairs = floors.iter().copied().peekable();
        while let Some((_, bound)) = pairs.next() {
            if let Some((next_tier, next_bound)) = pairs.peek().copied() {
                if next_bound <= bound {
                    return Err(PolicyError::NonMonotonicBrackets {
                        tier: next_tier,
                        bound: next_bound,
                        previous: bound,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            neolithic: default_neolithic_floor(),
            medieval: default_medieval_floor(),
            industrial: default_industrial_floor(),
            spacer: default_spacer_floor(),
            ultra: default_ultra_floor(),
        }
    }
}

/// Trade filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Goodwill below which no trade happens at all, regardless of tier.
    #[serde(default = "default_hostility_floor")]
    pub hostility_floor: i32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hostility_floor: default_hostility_floor(),
        }
    }
}

fn default_currency_item() -> ItemDefId {
    ItemDefId::new("silver")
}

const fn default_neolithic_floor() -> i32 {
    -25
}

const fn default_medieval_floor() -> i32 {
    5
}

const fn default_industrial_floor() -> i32 {
    35
}

const fn default_spacer_floor() -> i32 {
    55
}

const fn default_ultra_floor() -> i32 {
    75
}

const fn default_hostility_floor() -> i32 {
    -75
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = PolicyConfig::parse("{}");
        assert_eq!(config.ok(), Some(PolicyConfig::default()));
    }

    #[test]
    fn defaults_match_canonical_constants() {
        let config = PolicyConfig::default();
        assert_eq!(config.classifier.currency_item.as_str(), "silver");
        assert!(!config.classifier.extended_materials);
        assert_eq!(config.brackets.neolithic, -25);
        assert_eq!(config.brackets.ultra, 75);
        assert_eq!(config.filter.hostility_floor, -75);
    }

    #[test]
    fn partial_yaml_overrides_one_section() {
        let yaml = "classifier:\n  extended_materials: true\n";
        let config = PolicyConfig::parse(yaml).ok();
        assert_eq!(
            config.as_ref().map(|c| c.classifier.extended_materials),
            Some(true)
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.map(|c| c.brackets.medieval), Some(5));
    }

    #[test]
    fn non_monotonic_brackets_rejected() {
        let yaml = "brackets:\n  medieval: -30\n";
        let config = PolicyConfig::parse(yaml);
        assert!(matches!(
            config,
            Err(PolicyError::NonMonotonicBrackets {
                tier: TechTier::Medieval,
                bound: -30,
                previous: -25,
            })
        ));
    }

    #[test]
    fn equal_brackets_rejected() {
        let yaml = "brackets:\n  spacer: 35\n";
        assert!(PolicyConfig::parse(yaml).is_err());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let config = PolicyConfig::parse("brackets: [not, a, map]");
        assert!(matches!(config, Err(PolicyError::Yaml { .. })));
    }

    #[test]
    fn config_roundtrip_serde() {
        let original = PolicyConfig::default();
        let yaml = serde_yml::to_string(&original).ok();
        assert!(yaml.is_some());
        let restored = PolicyConfig::parse(yaml.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }
}
