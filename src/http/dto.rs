//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Engine types that already derive Serialize/Deserialize are re-exported;
//! the only translation layer is the config request, which accepts operator
//! style `HH:MM` start times.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    ConflictReason, DraftConflict, Fixture, FixtureBatch, MatchdayConfig, Round, ScheduleClash,
    Side, Slot, Team, TeamId, TeamPair, ValidationReport,
};
pub use crate::engine::composer::{AssignmentOutcome, WizardState};

use crate::models::time::parse_time_of_day;

/// Matchday configuration as the admin client sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchdayConfigDto {
    pub date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: String,
    pub slot_count: u32,
    pub match_minutes: u32,
    #[serde(default)]
    pub rest_minutes: u32,
    pub round: u32,
}

impl TryFrom<MatchdayConfigDto> for MatchdayConfig {
    type Error = String;

    fn try_from(dto: MatchdayConfigDto) -> Result<Self, Self::Error> {
        Ok(MatchdayConfig {
            date: dto.date,
            start_time: parse_time_of_day(&dto.start_time)?,
            slot_count: dto.slot_count,
            match_minutes: dto.match_minutes,
            rest_minutes: dto.rest_minutes,
            round: Round(dto.round),
        })
    }
}

/// Request body for opening a composition session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSessionRequest {
    pub league_id: i64,
    pub config: MatchdayConfigDto,
}

/// Response for session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub state: WizardState,
    pub roster: Vec<Team>,
}

/// Full draft snapshot for the wizard UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub session_id: Uuid,
    pub state: WizardState,
    pub config: MatchdayConfig,
    pub slots: Vec<Slot>,
    pub roster: Vec<Team>,
    /// Latest validation report, if one was computed for this draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_report: Option<ValidationReport>,
}

/// Request body for assigning a team to a slot side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub slot: usize,
    pub side: Side,
    pub team_id: TeamId,
}

/// Response for an assignment, including propagation effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignResponse {
    pub outcome: AssignmentOutcome,
    pub slots: Vec<Slot>,
}

/// Response for a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveResponse {
    pub removed: Option<TeamId>,
    pub slots: Vec<Slot>,
}

/// Query parameters for the candidate listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesQuery {
    pub side: Side,
}

/// Candidate teams for one side of a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub slot: usize,
    pub side: Side,
    pub candidates: Vec<TeamId>,
}

/// Response for a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResponse {
    pub batch: FixtureBatch,
    pub message: String,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of active composition sessions.
    pub sessions: usize,
}
