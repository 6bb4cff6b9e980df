//! Round matchup registry.
//!
//! Tracks which team pairs have already faced each other in the active
//! round. Lookups merge two sources: the immutable set recorded by earlier
//! matchdays (supplied by the league service once per session) and the
//! pairs tentatively held by filled slots in the draft being composed. The
//! scheduled subset is derived from the slot list on every lookup rather
//! than maintained as a separate set; the two can therefore never fall out
//! of sync, and nothing placed in a draft leaks past the session.

use std::collections::HashSet;

use crate::api::{Slot, TeamPair};

/// Session-scoped set of pairs already played in earlier matchdays of the
/// round. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct MatchupRegistry {
    played: HashSet<TeamPair>,
}

impl MatchupRegistry {
    pub fn new(played: impl IntoIterator<Item = TeamPair>) -> Self {
        Self {
            played: played.into_iter().collect(),
        }
    }

    /// Whether the pair was recorded as played by an earlier matchday.
    pub fn is_played_externally(&self, pair: TeamPair) -> bool {
        self.played.contains(&pair)
    }

    pub fn external_len(&self) -> usize {
        self.played.len()
    }

    pub fn iter_external(&self) -> impl Iterator<Item = &TeamPair> {
        self.played.iter()
    }
}

/// Pairs currently held by filled slots of the draft.
pub fn scheduled_pairs(slots: &[Slot]) -> HashSet<TeamPair> {
    slots.iter().filter_map(Slot::pair).collect()
}

/// Merged played-pair lookup over the registry and the current slot list.
///
/// A view is cheap to build and borrows both sources; it is constructed
/// fresh for every check. The optional excluded pair is the one occupying
/// the slot under edit, so its teams can be re-offered for that same slot.
#[derive(Debug, Clone, Copy)]
pub struct RegistryView<'a> {
    registry: &'a MatchupRegistry,
    slots: &'a [Slot],
    exclude: Option<TeamPair>,
}

impl<'a> RegistryView<'a> {
    pub fn new(registry: &'a MatchupRegistry, slots: &'a [Slot]) -> Self {
        Self {
            registry,
            slots,
            exclude: None,
        }
    }

    pub fn excluding(mut self, pair: Option<TeamPair>) -> Self {
        self.exclude = pair;
        self
    }

    /// Whether the pair has played: externally recorded, or held by a
    /// filled slot of the draft (minus the excluded pair).
    pub fn has_played(&self, pair: TeamPair) -> bool {
        self.registry.is_played_externally(pair) || self.scheduled_in_slot(pair).is_some()
    }

    /// Ordinal of the filled slot currently holding this pair, if any,
    /// honoring the exclusion.
    pub fn scheduled_in_slot(&self, pair: TeamPair) -> Option<usize> {
        if self.exclude == Some(pair) {
            return None;
        }
        self.slots
            .iter()
            .find(|slot| slot.pair() == Some(pair))
            .map(|slot| slot.ordinal)
    }
}
