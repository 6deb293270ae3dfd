//! The relationship scale: tier brackets over the goodwill domain.
//!
//! Goodwill between the player and a counterpart faction is a signed
//! integer, higher meaning friendlier. The scale partitions the whole
//! integer domain into six contiguous brackets, one per gated tier, in
//! ascending tier order. The bracket containing the current goodwill names
//! the highest tier that faction's traders will offer.
//!
//! The same table answers both runtime questions: "what tier is allowed at
//! this goodwill" ([`RelationScale::bracket_of`]) and "did a goodwill change
//! cross a tier boundary" ([`RelationScale::goodwill_shift`]), which is the
//! host's cue to discard stock it generated under the old bracket.

use caravan_types::TechTier;
use serde::{Deserialize, Serialize};

use crate::config::BracketConfig;
use crate::error::PolicyError;

/// The tier -> goodwill-floor table.
///
/// Each entry is the inclusive lower bound of that tier's bracket; a bracket
/// extends up to (excluding) the next floor, and the highest bracket is
/// unbounded above. Goodwill below the lowest floor falls into the
/// [`TechTier::Undefined`] bracket, where only ungated items are offered.
/// Floors strictly ascend, so the brackets cover every score exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationScale {
    floors: [(TechTier, i32); 5],
}

impl RelationScale {
    /// Build a scale from configured bracket floors.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NonMonotonicBrackets`] if the floors do not
    /// strictly ascend.
    pub fn from_config(brackets: &BracketConfig) -> Result<Self, PolicyError> {
        brackets.validate()?;
        Ok(Self {
            floors: brackets.floors(),
        })
    }

    /// The tier bracket containing the given goodwill score.
    ///
    /// Total and monotonically non-decreasing over the whole `i32` domain.
    /// Scores below the hostility floor still map to the `Undefined`
    /// bracket; refusing to trade at all down there is the filter's call,
    /// not the scale's.
    pub fn bracket_of(&self, goodwill: i32) -> TechTier {
        self.floors
            .iter()
            .rev()
            .find(|(_, floor)| goodwill >= *floor)
            .map_or(TechTier::Undefined, |(tier, _)| *tier)
    }

    /// Compare the brackets before and after a goodwill change.
    ///
    /// Pure: no I/O, no state. The host calls this whenever it records a
    /// goodwill delta and discards cached stock for the counterpart when
    /// [`BracketChange::crossed_boundary`] reports true.
    pub fn goodwill_shift(&self, old: i32, new: i32) -> BracketChange {
        BracketChange {
            before: self.bracket_of(old),
            after: self.bracket_of(new),
        }
    }
}

impl Default for RelationScale {
    /// The canonical six-bracket partition: Undefined below -25, Neolithic
    /// from -25, Medieval from 5, Industrial from 35, Spacer from 55, Ultra
    /// from 75 and up.
    fn default() -> Self {
        Self {
            floors: BracketConfig::default().floors(),
        }
    }
}

/// The outcome of comparing brackets across a goodwill change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketChange {
    /// The bracket the old goodwill fell into.
    pub before: TechTier,
    /// The bracket the new goodwill falls into.
    pub after: TechTier,
}

impl BracketChange {
    /// Whether the change moved the goodwill into a different bracket,
    /// invalidating any stock generated under the old one.
    pub fn crossed_boundary(&self) -> bool {
        self.before != self.after
    }
}
