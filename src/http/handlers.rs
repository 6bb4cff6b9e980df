//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one wizard operation and delegates to the
//! session service layer for business logic. Handlers lock the session for
//! the duration of the operation, so draft mutations stay serialized even
//! when a client misbehaves and sends overlapping requests.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    AssignRequest, AssignResponse, CandidatesQuery, CandidatesResponse, CommitResponse,
    DraftSnapshot, HealthResponse, MatchdayConfigDto, MessageResponse, OpenSessionRequest,
    RemoveResponse, SessionCreatedResponse,
};
use super::error::AppError;
use super::state::{AppState, SharedSession};
use crate::api::{LeagueId, MatchdayConfig, Side, ValidationReport};
use crate::services::CompositionSession;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn fetch_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("session {} does not exist", id)))
}

fn snapshot(id: Uuid, session: &CompositionSession) -> DraftSnapshot {
    DraftSnapshot {
        session_id: id,
        state: session.state(),
        config: session.config().clone(),
        slots: session.slots().to_vec(),
        roster: session.roster().to_vec(),
        last_report: session.last_report().cloned(),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        sessions: state.sessions.len(),
    }))
}

// =============================================================================
// Session lifecycle
// =============================================================================

/// POST /v1/sessions
///
/// Open a composition session: fetch the league's roster and round history
/// and start a draft in the Configuring state.
pub async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionCreatedResponse>), AppError> {
    let config = MatchdayConfig::try_from(request.config).map_err(AppError::BadRequest)?;
    let league = LeagueId(request.league_id);

    let session = CompositionSession::open(state.league.clone(), league, config).await?;
    let roster = session.roster().to_vec();
    let wizard_state = session.state();
    let session_id = state.sessions.insert(session);

    Ok((
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id,
            state: wizard_state,
            roster,
        }),
    ))
}

/// GET /v1/sessions/{session_id}
///
/// Current draft snapshot.
pub async fn get_draft(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<DraftSnapshot> {
    let session = fetch_session(&state, session_id)?;
    let session = session.lock().await;
    Ok(Json(snapshot(session_id, &session)))
}

/// DELETE /v1/sessions/{session_id}
///
/// Abandon the draft. Nothing external has been written before commit, so
/// dropping the session is the whole cleanup.
pub async fn discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<MessageResponse> {
    state
        .sessions
        .remove(session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {} does not exist", session_id)))?;
    Ok(Json(MessageResponse {
        message: format!("session {} discarded", session_id),
    }))
}

// =============================================================================
// Wizard steps
// =============================================================================

/// PUT /v1/sessions/{session_id}/config
///
/// Replace the matchday configuration (Configuring state only).
pub async fn update_config(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(dto): Json<MatchdayConfigDto>,
) -> HandlerResult<DraftSnapshot> {
    let config = MatchdayConfig::try_from(dto).map_err(AppError::BadRequest)?;
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    session.update_config(config)?;
    Ok(Json(snapshot(session_id, &session)))
}

/// POST /v1/sessions/{session_id}/assigning
///
/// Leave Configuring: clamp the slot count and materialize the slot list.
pub async fn begin_assigning(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<DraftSnapshot> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    session.begin_assigning()?;
    Ok(Json(snapshot(session_id, &session)))
}

/// GET /v1/sessions/{session_id}/slots/{slot}/candidates?side=home
///
/// Teams offerable for one side of a slot, pruned of dead-end picks.
pub async fn list_candidates(
    State(state): State<AppState>,
    Path((session_id, slot)): Path<(Uuid, usize)>,
    Query(query): Query<CandidatesQuery>,
) -> HandlerResult<CandidatesResponse> {
    let session = fetch_session(&state, session_id)?;
    let session = session.lock().await;
    let candidates = session.candidates(slot, query.side)?;
    Ok(Json(CandidatesResponse {
        slot,
        side: query.side,
        candidates,
    }))
}

/// POST /v1/sessions/{session_id}/assignments
///
/// Place a team on a slot side. The response reports whether the opposite
/// side was cleared by propagation.
pub async fn assign_team(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AssignRequest>,
) -> HandlerResult<AssignResponse> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    let outcome = session.assign_team(request.slot, request.side, request.team_id)?;
    Ok(Json(AssignResponse {
        outcome,
        slots: session.slots().to_vec(),
    }))
}

/// DELETE /v1/sessions/{session_id}/slots/{slot}/{side}
///
/// Clear one side of a slot.
pub async fn remove_team(
    State(state): State<AppState>,
    Path((session_id, slot, side)): Path<(Uuid, usize, Side)>,
) -> HandlerResult<RemoveResponse> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    let removed = session.remove_team(slot, side)?;
    Ok(Json(RemoveResponse {
        removed,
        slots: session.slots().to_vec(),
    }))
}

/// POST /v1/sessions/{session_id}/review
pub async fn begin_review(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<DraftSnapshot> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    session.begin_review()?;
    Ok(Json(snapshot(session_id, &session)))
}

/// POST /v1/sessions/{session_id}/back
///
/// Reviewing -> Assigning, the only backward transition.
pub async fn back_to_assigning(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<DraftSnapshot> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    session.back_to_assigning()?;
    Ok(Json(snapshot(session_id, &session)))
}

/// POST /v1/sessions/{session_id}/validate
///
/// Run the full validation pass, including the league service's
/// schedule-clash check.
pub async fn validate_draft(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<ValidationReport> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    let report = session.validate().await?;
    Ok(Json(report))
}

/// POST /v1/sessions/{session_id}/commit
///
/// Re-validate and submit the fixture batch. On upstream failure the draft
/// stays in Reviewing and the response is retryable.
pub async fn commit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<CommitResponse> {
    let session = fetch_session(&state, session_id)?;
    let mut session = session.lock().await;
    let batch = session.commit().await?;
    Ok(Json(CommitResponse {
        message: format!("matchday committed with {} fixture(s)", batch.fixtures.len()),
        batch,
    }))
}
