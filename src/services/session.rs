//! Composition session orchestration.
//!
//! A session binds one operator's draft to the league service: external
//! inputs (roster, played pairs, pairings owed) are fetched once when the
//! session opens, every draft mutation is synchronous, and the only await
//! points are the explicit external calls (clash check, commit sink). A
//! fetch therefore completes before anything depends on its result; the
//! engine never mutates against an in-flight response.

use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::api::{
    FixtureBatch, LeagueId, MatchdayConfig, Side, Slot, Team, TeamId, ValidationReport,
};
use crate::engine::composer::{
    AssignmentOutcome, ComposeError, MatchdayComposer, SessionInputs, WizardState,
};
use crate::engine::validator;
use crate::league::error::LeagueServiceError;
use crate::league::service::LeagueService;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Draft/state-machine error; recovered locally by the operator.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// League service call failed; retryable where the context says so.
    #[error(transparent)]
    League(#[from] LeagueServiceError),
}

/// One operator's matchday composition session.
#[derive(Debug)]
pub struct CompositionSession {
    service: Arc<dyn LeagueService>,
    composer: MatchdayComposer,
    /// Latest validation report, kept for snapshots. Commit never trusts
    /// it blindly: the revision stamp is checked by `prepare_batch`.
    last_report: Option<ValidationReport>,
}

impl CompositionSession {
    /// Open a session: fetch the session-scoped inputs and seed the
    /// composer in the Configuring state.
    ///
    /// The roster, the played-pair set, and the pairings-owed count are
    /// read once here and stay fixed for the session's lifetime; composing
    /// against them mid-flight can therefore never race a refetch.
    pub async fn open(
        service: Arc<dyn LeagueService>,
        league: LeagueId,
        config: MatchdayConfig,
    ) -> Result<Self, SessionError> {
        let round = config.round;
        let roster = service.list_available_teams(league).await?;
        let played_pairs = service.list_played_pairs(league, round).await?;
        let pairings_owed = service.pairings_owed_in_round(league, round).await?;

        info!(
            "opened composition session: league {}, round {}, {} team(s), {} pair(s) played, {} owed",
            league,
            round,
            roster.len(),
            played_pairs.len(),
            pairings_owed
        );

        let inputs = SessionInputs {
            league,
            roster,
            played_pairs,
            pairings_owed,
        };
        Ok(Self {
            service,
            composer: MatchdayComposer::new(inputs, config),
            last_report: None,
        })
    }

    pub fn state(&self) -> WizardState {
        self.composer.state()
    }

    pub fn config(&self) -> &MatchdayConfig {
        self.composer.config()
    }

    pub fn slots(&self) -> &[Slot] {
        self.composer.slots()
    }

    pub fn roster(&self) -> &[Team] {
        self.composer.roster()
    }

    pub fn league(&self) -> LeagueId {
        self.composer.league()
    }

    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    pub fn update_config(&mut self, config: MatchdayConfig) -> Result<(), SessionError> {
        self.composer.update_config(config)?;
        Ok(())
    }

    pub fn begin_assigning(&mut self) -> Result<(), SessionError> {
        self.composer.begin_assigning()?;
        Ok(())
    }

    pub fn candidates(&self, slot: usize, side: Side) -> Result<Vec<TeamId>, SessionError> {
        Ok(self.composer.candidates(slot, side)?)
    }

    pub fn assign_team(
        &mut self,
        slot: usize,
        side: Side,
        team: TeamId,
    ) -> Result<AssignmentOutcome, SessionError> {
        Ok(self.composer.assign_team(slot, side, team)?)
    }

    pub fn remove_team(&mut self, slot: usize, side: Side) -> Result<Option<TeamId>, SessionError> {
        Ok(self.composer.remove_team(slot, side)?)
    }

    pub fn begin_review(&mut self) -> Result<(), SessionError> {
        self.composer.begin_review()?;
        Ok(())
    }

    pub fn back_to_assigning(&mut self) -> Result<(), SessionError> {
        self.composer.back_to_assigning()?;
        Ok(())
    }

    /// Validate the draft, including the league service's schedule-clash
    /// check against already-committed matchdays.
    ///
    /// The clash fetch completes before the verdict is computed, and the
    /// report is stamped with the draft revision it saw.
    pub async fn validate(&mut self) -> Result<ValidationReport, SessionError> {
        let clashes = self
            .service
            .check_schedule_clashes(self.composer.league(), self.composer.slots())
            .await?;
        let report = validator::validate(&self.composer, &clashes);
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Commit the draft: re-validate, extract the fixture batch, submit it,
    /// and finalize.
    ///
    /// The sink call is the single external mutation. On failure the draft
    /// stays in Reviewing and the error is returned; retrying is an
    /// explicit operator action, never automatic.
    pub async fn commit(&mut self) -> Result<FixtureBatch, SessionError> {
        let report = self.validate().await?;
        if !report.is_valid() {
            warn!(
                "commit refused: draft incomplete or conflicted ({} finding(s))",
                report.conflicts.len()
            );
            return Err(ComposeError::DraftInvalid {
                conflicts: report.conflicts.len(),
            }
            .into());
        }

        let batch = self.composer.prepare_batch(&report)?;
        if let Err(err) = self.service.create_matchday(&batch).await {
            warn!(
                "commit failed for batch {}; draft stays in reviewing: {}",
                batch.checksum, err
            );
            return Err(err.into());
        }
        self.composer.mark_committed()?;
        info!("committed fixture batch {}", batch.checksum);
        Ok(batch)
    }

    /// Abandon the draft. No external writes have happened before commit,
    /// so this is purely local.
    pub fn discard(&mut self) -> Result<(), SessionError> {
        self.composer.discard()?;
        self.last_report = None;
        Ok(())
    }
}
