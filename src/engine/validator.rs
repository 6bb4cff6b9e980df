//! Draft validation.
//!
//! Produces the [`ValidationReport`] that gates commit: completeness (every
//! slot filled) and conflict freedom (no duplicate pairs within the draft,
//! no pair already played this round, no external schedule clash). Each
//! finding names the slot, the teams, and the reason; the operator never
//! sees a generic failure.
//!
//! The validator is pure. External clashes come from the latest completed
//! league-service fetch and are passed in by the session layer.

use std::collections::HashMap;

use crate::api::{
    ConflictReason, DraftConflict, Round, ScheduleClash, Slot, TeamPair, ValidationReport,
};
use crate::engine::composer::MatchdayComposer;
use crate::engine::registry::MatchupRegistry;
use crate::models::time::format_kickoff;

/// Validate the current draft against the session's external data.
pub fn validate(composer: &MatchdayComposer, clashes: &[ScheduleClash]) -> ValidationReport {
    validate_parts(
        composer.slots(),
        composer.registry(),
        composer.config().round,
        composer.revision(),
        clashes,
    )
}

/// Validation over the draft's raw parts.
///
/// The assignment path keeps most invalid states unreachable, but the
/// validator re-checks everything anyway: it is the last line before the
/// fixture batch leaves the process, and session data can go stale.
pub fn validate_parts(
    slots: &[Slot],
    registry: &MatchupRegistry,
    round: Round,
    revision: u64,
    clashes: &[ScheduleClash],
) -> ValidationReport {
    let mut conflicts = Vec::new();

    let mut complete = !slots.is_empty();
    for slot in slots {
        if !slot.is_filled() {
            complete = false;
            conflicts.push(DraftConflict {
                slot: Some(slot.ordinal),
                teams: None,
                reason: ConflictReason::SlotUnderfilled,
                description: format!(
                    "slot {} ({}) is missing {}",
                    slot.ordinal,
                    format_kickoff(slot.kickoff),
                    match (slot.home, slot.away) {
                        (None, None) => "both teams",
                        (None, Some(_)) => "the home team",
                        _ => "the away team",
                    }
                ),
            });
        }
    }

    let mut seen: HashMap<TeamPair, usize> = HashMap::new();
    for slot in slots {
        let Some(pair) = slot.pair() else { continue };

        if let Some(&first) = seen.get(&pair) {
            conflicts.push(DraftConflict {
                slot: Some(slot.ordinal),
                teams: Some(pair),
                reason: ConflictReason::DuplicatePair,
                description: format!(
                    "pair {} appears in both slot {} and slot {}",
                    pair, first, slot.ordinal
                ),
            });
        } else {
            seen.insert(pair, slot.ordinal);
        }

        if registry.is_played_externally(pair) {
            conflicts.push(DraftConflict {
                slot: Some(slot.ordinal),
                teams: Some(pair),
                reason: ConflictReason::AlreadyPlayedThisRound,
                description: format!("pair {} already played in round {}", pair, round),
            });
        }
    }

    for clash in clashes {
        let slot = slots
            .iter()
            .find(|s| {
                s.kickoff == clash.kickoff
                    && (s.home == Some(clash.team) || s.away == Some(clash.team))
            })
            .map(|s| s.ordinal);
        conflicts.push(DraftConflict {
            slot,
            teams: None,
            reason: ConflictReason::ExternalClash,
            description: clash.description.clone(),
        });
    }

    let conflict_free = !conflicts
        .iter()
        .any(|c| c.reason != ConflictReason::SlotUnderfilled);

    ValidationReport {
        complete,
        conflict_free,
        conflicts,
        revision,
    }
}
