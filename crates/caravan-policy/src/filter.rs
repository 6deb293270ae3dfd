//! The runtime trade filter: relationship-gated stock decisions.
//!
//! The host's stock pipeline generates candidate items per transaction and
//! runs them through [`TradeGate::filter_stock`] as a post-processing step;
//! its per-item trade-eligibility check goes through
//! [`TradeGate::will_trade`]. Both reduce to [`TradeGate::is_included`],
//! which is pure, allocation-free, and safe to call from any number of
//! concurrent readers.
//!
//! Decisions always fail open: an item the snapshot has never seen is
//! offered rather than withheld.

use std::borrow::Borrow;

use caravan_types::{FactionId, ItemDefId};

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::scale::{BracketChange, RelationScale};
use crate::snapshot::TierSnapshot;

/// Who the trade offer is being generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterpart {
    /// The player's own stock (colony inventories, orbital beacons).
    /// Never gated.
    PlayerOwned,
    /// A counterpart faction with its current goodwill toward the player.
    Faction {
        /// The counterpart faction.
        id: FactionId,
        /// Current goodwill, as resolved by the host's relationship store.
        goodwill: i32,
    },
}

impl Counterpart {
    /// Convenience constructor for a faction counterpart.
    pub fn faction(id: impl Into<FactionId>, goodwill: i32) -> Self {
        Self::Faction {
            id: id.into(),
            goodwill,
        }
    }
}

/// The trade gate: a relationship scale plus the hostility floor.
///
/// One gate serves the whole session; it holds no per-faction state and
/// reads whatever [`TierSnapshot`] the host currently owns, so a catalog
/// reload (a fresh snapshot swapped in wholesale) never invalidates the
/// gate itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeGate {
    scale: RelationScale,
    hostility_floor: i32,
}

impl TradeGate {
    /// Create a gate from a scale and a hostility floor.
    pub const fn new(scale: RelationScale, hostility_floor: i32) -> Self {
        Self {
            scale,
            hostility_floor,
        }
    }

    /// Build a gate from a policy configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NonMonotonicBrackets`] if the configured
    /// bracket floors do not strictly ascend.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        Ok(Self {
            scale: RelationScale::from_config(&config.brackets)?,
            hostility_floor: config.filter.hostility_floor,
        })
    }

    /// The relationship scale this gate filters with.
    pub const fn scale(&self) -> &RelationScale {
        &self.scale
    }

    /// Decide whether an item belongs in a trade offer for a counterpart.
    ///
    /// In order: player-owned stock always passes; goodwill below the
    /// hostility floor excludes everything; unrestricted items always pass;
    /// unknown items pass (fail open); otherwise the item's tier must not
    /// exceed the tier bracket of the current goodwill.
    pub fn is_included(
        &self,
        snapshot: &TierSnapshot,
        item: &ItemDefId,
        counterpart: &Counterpart,
    ) -> bool {
        let goodwill = match counterpart {
            Counterpart::PlayerOwned => return true,
            Counterpart::Faction { goodwill, .. } => *goodwill,
        };

        if goodwill < self.hostility_floor {
            return false;
        }

        if snapshot.is_unrestricted(item) {
            return true;
        }

        match snapshot.tier_of(item) {
            None => true,
            Some(tier) => tier <= self.scale.bracket_of(goodwill),
        }
    }

    /// Filter a generated stock list down to the items the counterpart may
    /// be offered, preserving order.
    ///
    /// This is the post-processing step the host's stock pipeline applies
    /// to each generator's output before the offer is assembled.
    pub fn filter_stock<'a, I>(
        &'a self,
        snapshot: &'a TierSnapshot,
        counterpart: &'a Counterpart,
        stock: I,
    ) -> impl Iterator<Item = I::Item> + 'a
    where
        I: IntoIterator + 'a,
        I::Item: Borrow<ItemDefId>,
    {
        stock
            .into_iter()
            .filter(move |item| self.is_included(snapshot, item.borrow(), counterpart))
    }

    /// Combine the host's own per-trader eligibility verdict with the
    /// relationship gate.
    ///
    /// The gate only ever narrows: an item the host already refuses to
    /// trade stays refused.
    pub fn will_trade(
        &self,
        snapshot: &TierSnapshot,
        item: &ItemDefId,
        counterpart: &Counterpart,
        host_verdict: bool,
    ) -> bool {
        host_verdict && self.is_included(snapshot, item, counterpart)
    }

    /// Compare the brackets before and after a goodwill change.
    ///
    /// The host calls this on every recorded goodwill delta; a crossing
    /// means stock generated under the old bracket is stale and must be
    /// discarded for that counterpart.
    pub fn goodwill_shift(&self, old: i32, new: i32) -> BracketChange {
        self.scale.goodwill_shift(old, new)
    }
}

impl Default for TradeGate {
    /// The canonical gate: default scale, hostility floor at -75.
    fn default() -> Self {
        Self {
            scale: RelationScale::default(),
            hostility_floor: -75,
        }
    }
}
