//! Matchday composer: the draft and its wizard state machine.
//!
//! One composer owns one in-progress matchday. Mutations are synchronous
//! and state-guarded in one place; the session layer owns the async
//! boundary to the league service and feeds the composer immutable,
//! session-scoped inputs.
//!
//! States: Configuring -> Assigning -> Reviewing -> Committed, with
//! Reviewing -> Assigning as the only backward transition and discard
//! available from any non-terminal state.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::api::{
    Fixture, FixtureBatch, LeagueId, MatchdayConfig, Round, Side, Slot, Team, TeamId, TeamPair,
    ValidationReport,
};
use crate::engine::availability;
use crate::engine::registry::{MatchupRegistry, RegistryView};
use crate::engine::slots::generate_slots;

/// Wizard step the draft is in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    Configuring,
    Assigning,
    Reviewing,
    Committed,
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardState::Configuring => write!(f, "configuring"),
            WizardState::Assigning => write!(f, "assigning"),
            WizardState::Reviewing => write!(f, "reviewing"),
            WizardState::Committed => write!(f, "committed"),
        }
    }
}

/// Session-scoped inputs fetched once from the league service.
///
/// Read-only for the lifetime of the composition session; refreshing them
/// means opening a new session.
#[derive(Debug, Clone)]
pub struct SessionInputs {
    pub league: LeagueId,
    pub roster: Vec<Team>,
    /// Pairs recorded as played by earlier matchdays of the round.
    pub played_pairs: Vec<TeamPair>,
    /// Matches not yet created for the round; caps the slot count.
    pub pairings_owed: u32,
}

/// Result of a successful assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub slot: usize,
    pub side: Side,
    pub team: TeamId,
    /// Team removed from the opposite side because the newly formed pair
    /// was no longer eligible. Deliberate propagation, not an error.
    pub cleared_opposite: Option<TeamId>,
}

/// Errors surfaced by composer operations.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("operation '{operation}' is not allowed in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: WizardState,
    },

    #[error("invalid matchday configuration: {0}")]
    InvalidConfig(String),

    #[error("no pairings are owed in round {0}; nothing to schedule")]
    NothingOwed(Round),

    #[error("slot {0} does not exist")]
    UnknownSlot(usize),

    #[error("team {0} is not in the league roster")]
    UnknownTeam(TeamId),

    #[error("team {0} cannot occupy both sides of a slot")]
    SameTeamBothSides(TeamId),

    #[error("pair {0} has already played in this round")]
    PairAlreadyPlayed(TeamPair),

    #[error("pair {pair} is already scheduled in slot {slot} of this matchday")]
    PairAlreadyScheduled { pair: TeamPair, slot: usize },

    #[error("draft is not committable ({conflicts} unresolved conflict(s))")]
    DraftInvalid { conflicts: usize },

    #[error(
        "validation report is stale (validated revision {report_revision}, draft is at {draft_revision})"
    )]
    StaleValidation {
        report_revision: u64,
        draft_revision: u64,
    },
}

/// The in-progress matchday draft.
#[derive(Debug)]
pub struct MatchdayComposer {
    inputs: SessionInputs,
    registry: MatchupRegistry,
    config: MatchdayConfig,
    slots: Vec<Slot>,
    state: WizardState,
    /// Bumped on every mutation; validation reports are stamped with the
    /// revision they saw so a stale report cannot authorize a commit.
    revision: u64,
}

impl MatchdayComposer {
    pub fn new(inputs: SessionInputs, config: MatchdayConfig) -> Self {
        let registry = MatchupRegistry::new(inputs.played_pairs.iter().copied());
        Self {
            inputs,
            registry,
            config,
            slots: Vec::new(),
            state: WizardState::Configuring,
            revision: 0,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn config(&self) -> &MatchdayConfig {
        &self.config
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn roster(&self) -> &[Team] {
        &self.inputs.roster
    }

    pub fn league(&self) -> LeagueId {
        self.inputs.league
    }

    pub fn pairings_owed(&self) -> u32 {
        self.inputs.pairings_owed
    }

    pub fn registry(&self) -> &MatchupRegistry {
        &self.registry
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn require_state(
        &self,
        expected: WizardState,
        operation: &'static str,
    ) -> Result<(), ComposeError> {
        if self.state != expected {
            return Err(ComposeError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Replace the configuration. Only allowed while Configuring.
    pub fn update_config(&mut self, config: MatchdayConfig) -> Result<(), ComposeError> {
        self.require_state(WizardState::Configuring, "update_config")?;
        config.validate().map_err(ComposeError::InvalidConfig)?;
        self.config = config;
        self.touch();
        Ok(())
    }

    /// Leave Configuring: clamp the slot count to the pairings still owed
    /// in the round and materialize the timed slot list.
    pub fn begin_assigning(&mut self) -> Result<(), ComposeError> {
        self.require_state(WizardState::Configuring, "begin_assigning")?;
        self.config
            .validate()
            .map_err(ComposeError::InvalidConfig)?;
        if self.inputs.pairings_owed == 0 {
            return Err(ComposeError::NothingOwed(self.config.round));
        }

        let requested = self.config.slot_count;
        let clamped = requested.min(self.inputs.pairings_owed);
        if clamped < requested {
            info!(
                "clamping matchday to {} slot(s); round {} owes only {} pairing(s)",
                clamped, self.config.round, self.inputs.pairings_owed
            );
            self.config.slot_count = clamped;
        }

        self.slots = generate_slots(&self.config);
        self.state = WizardState::Assigning;
        self.touch();
        debug!(
            "entered assigning with {} slot(s) starting {}",
            self.slots.len(),
            self.config.start_time
        );
        Ok(())
    }

    /// Candidate teams for one side of a slot, pruned of dead-end picks.
    pub fn candidates(&self, slot: usize, side: Side) -> Result<Vec<TeamId>, ComposeError> {
        self.require_state(WizardState::Assigning, "candidates")?;
        let slot = self
            .slots
            .get(slot)
            .ok_or(ComposeError::UnknownSlot(slot))?;
        Ok(availability::candidates_for_slot_side(
            &self.registry,
            &self.slots,
            &self.inputs.roster,
            slot,
            side,
        ))
    }

    /// Place `team` on `side` of `slot`.
    ///
    /// A fresh assignment against an ineligible opposite side is rejected
    /// with the specific reason. A reassignment (the side already held a
    /// team) that makes the opposite side incompatible succeeds and clears
    /// that side, reporting it in the outcome.
    pub fn assign_team(
        &mut self,
        slot: usize,
        side: Side,
        team: TeamId,
    ) -> Result<AssignmentOutcome, ComposeError> {
        self.require_state(WizardState::Assigning, "assign_team")?;
        let ordinal = slot;
        let slot_ref = self
            .slots
            .get(ordinal)
            .ok_or(ComposeError::UnknownSlot(ordinal))?;
        if !self.inputs.roster.iter().any(|t| t.id == team) {
            return Err(ComposeError::UnknownTeam(team));
        }

        let occupant = slot_ref.team_on(side);
        let opposite = slot_ref.team_on(side.opposite());
        if opposite == Some(team) {
            return Err(ComposeError::SameTeamBothSides(team));
        }

        let mut cleared_opposite = None;
        if let Some(opponent) = opposite {
            // Distinct by the check above, so the pair always constructs.
            let pair = TeamPair::new(team, opponent)
                .map_err(|_| ComposeError::SameTeamBothSides(team))?;
            let view = RegistryView::new(&self.registry, &self.slots).excluding(slot_ref.pair());
            if view.has_played(pair) {
                if occupant.is_some() {
                    // Reassignment: keep the operator's pick, drop the now
                    // incompatible opposite side.
                    cleared_opposite = Some(opponent);
                } else if self.registry.is_played_externally(pair) {
                    return Err(ComposeError::PairAlreadyPlayed(pair));
                } else {
                    let held_in = view.scheduled_in_slot(pair).unwrap_or(ordinal);
                    return Err(ComposeError::PairAlreadyScheduled {
                        pair,
                        slot: held_in,
                    });
                }
            }
        }

        let slot_mut = &mut self.slots[ordinal];
        if cleared_opposite.is_some() {
            slot_mut.set_team(side.opposite(), None);
        }
        slot_mut.set_team(side, Some(team));
        self.touch();

        if let Some(dropped) = cleared_opposite {
            debug!(
                "slot {}: {} -> team {}, cleared team {} from the {} side",
                ordinal,
                side,
                team,
                dropped,
                side.opposite()
            );
        } else {
            debug!("slot {}: {} -> team {}", ordinal, side, team);
        }

        Ok(AssignmentOutcome {
            slot: ordinal,
            side,
            team,
            cleared_opposite,
        })
    }

    /// Clear one side of a slot. Returns the team that was removed.
    pub fn remove_team(
        &mut self,
        slot: usize,
        side: Side,
    ) -> Result<Option<TeamId>, ComposeError> {
        self.require_state(WizardState::Assigning, "remove_team")?;
        let slot_ref = self
            .slots
            .get_mut(slot)
            .ok_or(ComposeError::UnknownSlot(slot))?;
        let removed = slot_ref.team_on(side);
        slot_ref.set_team(side, None);
        self.touch();
        Ok(removed)
    }

    /// Move to Reviewing. Unconditional: validity is surfaced there, not
    /// gated here, so an incomplete draft can still be inspected.
    pub fn begin_review(&mut self) -> Result<(), ComposeError> {
        self.require_state(WizardState::Assigning, "begin_review")?;
        self.state = WizardState::Reviewing;
        self.touch();
        Ok(())
    }

    /// The only backward transition.
    pub fn back_to_assigning(&mut self) -> Result<(), ComposeError> {
        self.require_state(WizardState::Reviewing, "back_to_assigning")?;
        self.state = WizardState::Assigning;
        self.touch();
        Ok(())
    }

    /// Extract the fixture batch under a passing, current validation report.
    ///
    /// Does not transition: the session layer submits the batch first and
    /// calls [`mark_committed`](Self::mark_committed) only after the sink
    /// accepted it, so a failed submission leaves the draft in Reviewing.
    pub fn prepare_batch(&self, report: &ValidationReport) -> Result<FixtureBatch, ComposeError> {
        self.require_state(WizardState::Reviewing, "prepare_batch")?;
        if report.revision != self.revision {
            return Err(ComposeError::StaleValidation {
                report_revision: report.revision,
                draft_revision: self.revision,
            });
        }
        if !report.is_valid() {
            return Err(ComposeError::DraftInvalid {
                conflicts: report.conflicts.len(),
            });
        }

        let fixtures: Vec<Fixture> = self
            .slots
            .iter()
            .filter_map(|slot| match (slot.home, slot.away) {
                (Some(home), Some(away)) => Some(Fixture {
                    home,
                    away,
                    round: self.config.round,
                    kickoff: slot.kickoff,
                }),
                _ => None,
            })
            .collect();

        let checksum = compute_batch_checksum(self.inputs.league, &fixtures);
        info!(
            "prepared fixture batch for league {}: {} fixture(s), checksum {}",
            self.inputs.league,
            fixtures.len(),
            checksum
        );

        Ok(FixtureBatch {
            league: self.inputs.league,
            fixtures,
            checksum,
        })
    }

    /// Finalize after the league service accepted the batch. Terminal.
    pub fn mark_committed(&mut self) -> Result<(), ComposeError> {
        self.require_state(WizardState::Reviewing, "mark_committed")?;
        self.state = WizardState::Committed;
        info!("matchday committed for league {}", self.inputs.league);
        Ok(())
    }

    /// Abandon the draft: clear all slots and return to Configuring. No
    /// external writes have happened, so nothing needs undoing. Rejected
    /// once Committed.
    pub fn discard(&mut self) -> Result<(), ComposeError> {
        if self.state == WizardState::Committed {
            return Err(ComposeError::InvalidState {
                operation: "discard",
                state: self.state,
            });
        }
        self.slots.clear();
        self.state = WizardState::Configuring;
        self.touch();
        info!("draft discarded for league {}", self.inputs.league);
        Ok(())
    }
}

/// Checksum identifying a fixture batch in logs and commit correlation.
fn compute_batch_checksum(league: LeagueId, fixtures: &[Fixture]) -> String {
    let payload =
        serde_json::to_string(&(league, fixtures)).expect("fixture batch serializes to JSON");
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
#[path = "composer_tests.rs"]
mod composer_tests;
