//! In-memory league service implementation.
//!
//! Provides a local implementation of all four collaborator traits,
//! suitable for unit testing and local development. All data is stored in
//! memory, so sessions are fast, deterministic, and isolated. Tests seed
//! rosters, round history, and clash lists, then assert on the fixture
//! batches the engine commits.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{ErrorContext, LeagueResult, LeagueServiceError};
use super::service::{ConflictSource, FixtureSink, RosterSource, RoundHistorySource};
use crate::api::{FixtureBatch, LeagueId, Round, ScheduleClash, Slot, Team, TeamPair};

/// In-memory local league service.
///
/// Cloning shares the underlying data, matching how an `Arc<dyn
/// LeagueService>` behaves in the service layer.
///
/// # Example
/// ```
/// use liga_rust::api::{LeagueId, Round, Team, TeamId};
/// use liga_rust::league::LocalLeagueService;
///
/// let league = LeagueId(1);
/// let service = LocalLeagueService::new();
/// service.add_team(league, Team::new(TeamId(1), "Los Bloqueadores"));
/// service.set_pairings_owed(league, Round(1), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalLeagueService {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug, Default)]
struct LocalData {
    teams: HashMap<LeagueId, Vec<Team>>,
    played: HashMap<(LeagueId, Round), Vec<TeamPair>>,
    owed: HashMap<(LeagueId, Round), u32>,
    clashes: HashMap<LeagueId, Vec<ScheduleClash>>,
    committed: Vec<FixtureBatch>,
    fail_next_commit: Option<String>,
}

impl LocalLeagueService {
    /// Create a new empty local league service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team in a league's roster.
    pub fn add_team(&self, league: LeagueId, team: Team) {
        self.data.write().teams.entry(league).or_default().push(team);
    }

    /// Record a pair as already played in a round.
    pub fn record_played_pair(&self, league: LeagueId, round: Round, pair: TeamPair) {
        self.data
            .write()
            .played
            .entry((league, round))
            .or_default()
            .push(pair);
    }

    /// Set the number of pairings still owed in a round.
    pub fn set_pairings_owed(&self, league: LeagueId, round: Round, owed: u32) {
        self.data.write().owed.insert((league, round), owed);
    }

    /// Register a double-booking the conflict check should report.
    pub fn add_clash(&self, league: LeagueId, clash: ScheduleClash) {
        self.data.write().clashes.entry(league).or_default().push(clash);
    }

    /// Make the next `create_matchday` call fail with a transport error.
    pub fn fail_next_commit(&self, message: impl Into<String>) {
        self.data.write().fail_next_commit = Some(message.into());
    }

    /// Fixture batches accepted by the sink, in submission order.
    pub fn committed_batches(&self) -> Vec<FixtureBatch> {
        self.data.read().committed.clone()
    }
}

#[async_trait]
impl RosterSource for LocalLeagueService {
    async fn list_available_teams(&self, league: LeagueId) -> LeagueResult<Vec<Team>> {
        let data = self.data.read();
        data.teams.get(&league).cloned().ok_or_else(|| {
            LeagueServiceError::not_found_with_context(
                format!("league {} has no roster", league),
                ErrorContext::new("list_available_teams")
                    .with_entity("league")
                    .with_entity_id(league),
            )
        })
    }
}

#[async_trait]
impl RoundHistorySource for LocalLeagueService {
    async fn list_played_pairs(
        &self,
        league: LeagueId,
        round: Round,
    ) -> LeagueResult<Vec<TeamPair>> {
        let data = self.data.read();
        Ok(data.played.get(&(league, round)).cloned().unwrap_or_default())
    }

    async fn pairings_owed_in_round(&self, league: LeagueId, round: Round) -> LeagueResult<u32> {
        let data = self.data.read();
        Ok(data.owed.get(&(league, round)).copied().unwrap_or(0))
    }
}

#[async_trait]
impl ConflictSource for LocalLeagueService {
    async fn check_schedule_clashes(
        &self,
        league: LeagueId,
        candidate_slots: &[Slot],
    ) -> LeagueResult<Vec<ScheduleClash>> {
        let data = self.data.read();
        let Some(clashes) = data.clashes.get(&league) else {
            return Ok(Vec::new());
        };
        // Report only clashes involving teams actually placed in the draft.
        Ok(clashes
            .iter()
            .filter(|clash| {
                candidate_slots.iter().any(|slot| {
                    slot.home == Some(clash.team) || slot.away == Some(clash.team)
                })
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FixtureSink for LocalLeagueService {
    async fn create_matchday(&self, batch: &FixtureBatch) -> LeagueResult<()> {
        let mut data = self.data.write();
        if let Some(message) = data.fail_next_commit.take() {
            return Err(LeagueServiceError::transport_with_context(
                message,
                ErrorContext::new("create_matchday")
                    .with_entity("fixture_batch")
                    .with_entity_id(&batch.checksum),
            ));
        }
        if batch.fixtures.is_empty() {
            return Err(LeagueServiceError::rejected_with_context(
                "fixture batch is empty",
                ErrorContext::new("create_matchday").with_entity("fixture_batch"),
            ));
        }
        data.committed.push(batch.clone());
        Ok(())
    }
}
