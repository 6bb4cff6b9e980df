//! Team availability filtering.
//!
//! The single source of truth for "may this team be offered here". Both the
//! candidate lists shown to the operator and the composer's own assignment
//! checks go through these functions, so the two can never disagree.
//!
//! A team may occupy multiple slots within one matchday; the uniqueness
//! constraint binds the pair, never the single team. That is a domain rule.

use crate::api::{Side, Slot, Team, TeamId, TeamPair};
use crate::engine::registry::{MatchupRegistry, RegistryView};

/// All teams `team` could still face, given the merged played-pair view.
///
/// The view's exclusion (the pair occupying the slot under edit) is
/// honored, so the current occupants of that slot remain offerable in it.
pub fn eligible_opponents(view: &RegistryView<'_>, roster: &[Team], team: TeamId) -> Vec<TeamId> {
    roster
        .iter()
        .map(|t| t.id)
        .filter(|&other| other != team)
        .filter(|&other| match TeamPair::new(team, other) {
            Ok(pair) => !view.has_played(pair),
            Err(_) => false,
        })
        .collect()
}

/// Whether `team` has at least one remaining eligible opponent.
pub fn has_eligible_opponent(view: &RegistryView<'_>, roster: &[Team], team: TeamId) -> bool {
    roster.iter().map(|t| t.id).any(|other| {
        other != team
            && TeamPair::new(team, other)
                .map(|pair| !view.has_played(pair))
                .unwrap_or(false)
    })
}

/// Teams worth offering at all: those with at least one eligible opponent.
///
/// Used to prune candidate lists so operators are never handed a dead-end
/// pick. Preserves roster order.
pub fn teams_with_eligible_opponent(view: &RegistryView<'_>, roster: &[Team]) -> Vec<TeamId> {
    roster
        .iter()
        .map(|t| t.id)
        .filter(|&team| has_eligible_opponent(view, roster, team))
        .collect()
}

/// Candidates for one side of a slot.
///
/// If the opposite side is already filled, only the occupant's eligible
/// opponents qualify (mutual eligibility); otherwise any team that is not a
/// dead end qualifies. The slot's own pair is excluded from the lookup so
/// the teams it currently holds can be re-picked in place.
pub fn candidates_for_slot_side(
    registry: &MatchupRegistry,
    slots: &[Slot],
    roster: &[Team],
    slot: &Slot,
    side: Side,
) -> Vec<TeamId> {
    let view = RegistryView::new(registry, slots).excluding(slot.pair());
    match slot.team_on(side.opposite()) {
        Some(opponent) => eligible_opponents(&view, roster, opponent),
        None => teams_with_eligible_opponent(&view, roster),
    }
}
