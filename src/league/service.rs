//! League service trait definitions.
//!
//! One trait per collaborator concern, plus an umbrella trait for
//! implementations that provide all of them. The engine only ever depends
//! on these contracts; the wire format behind them is an implementation
//! detail.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

use async_trait::async_trait;

use super::error::LeagueResult;
use crate::api::{FixtureBatch, LeagueId, Round, ScheduleClash, Slot, Team, TeamPair};

/// Teams eligible to play in a league/group.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// List the teams available for matchday composition.
    ///
    /// Fetched once per composition session and treated as read-only
    /// input for its duration.
    async fn list_available_teams(&self, league: LeagueId) -> LeagueResult<Vec<Team>>;
}

/// What has already happened in the active round.
#[async_trait]
pub trait RoundHistorySource: Send + Sync {
    /// Pairs that already met in earlier matchdays of the round.
    async fn list_played_pairs(
        &self,
        league: LeagueId,
        round: Round,
    ) -> LeagueResult<Vec<TeamPair>>;

    /// Matches not yet created for the round; caps the slot count of a
    /// new matchday.
    async fn pairings_owed_in_round(&self, league: LeagueId, round: Round) -> LeagueResult<u32>;
}

/// Double-booking checks against already-committed matchdays.
#[async_trait]
pub trait ConflictSource: Send + Sync {
    /// Check the candidate slots for teams already booked at an
    /// overlapping time. An empty result means no clashes.
    async fn check_schedule_clashes(
        &self,
        league: LeagueId,
        candidate_slots: &[Slot],
    ) -> LeagueResult<Vec<ScheduleClash>>;
}

/// The single external mutation: matchday creation.
#[async_trait]
pub trait FixtureSink: Send + Sync {
    /// Submit a committed fixture batch.
    ///
    /// The engine treats this call as atomic and never retries it
    /// automatically; a retry is an explicit operator action on a draft
    /// still in Reviewing.
    async fn create_matchday(&self, batch: &FixtureBatch) -> LeagueResult<()>;
}

/// Umbrella trait for full league service implementations.
pub trait LeagueService:
    RosterSource + RoundHistorySource + ConflictSource + FixtureSink + std::fmt::Debug
{
}

impl<T> LeagueService for T where
    T: RosterSource + RoundHistorySource + ConflictSource + FixtureSink + std::fmt::Debug
{
}
