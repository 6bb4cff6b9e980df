//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::composer::ComposeError;
use crate::league::error::LeagueServiceError;
use crate::services::SessionError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether retrying the same request may succeed
    #[serde(default)]
    pub retryable: bool,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: false,
        }
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (session, slot, team, league)
    NotFound(String),
    /// Invalid request (malformed config, bad time string)
    BadRequest(String),
    /// The draft's state machine or pairing rules refused the operation
    Conflict(String),
    /// The league platform failed; safe to retry
    Upstream(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg)),
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("LEAGUE_SERVICE_ERROR", msg).retryable(),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        match &err {
            ComposeError::InvalidConfig(_) => AppError::BadRequest(err.to_string()),
            ComposeError::UnknownSlot(_) | ComposeError::UnknownTeam(_) => {
                AppError::NotFound(err.to_string())
            }
            _ => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<LeagueServiceError> for AppError {
    fn from(err: LeagueServiceError) -> Self {
        match &err {
            LeagueServiceError::NotFound { .. } => AppError::NotFound(err.to_string()),
            LeagueServiceError::Rejected { .. } => AppError::Conflict(err.to_string()),
            LeagueServiceError::Transport { .. } | LeagueServiceError::Timeout { .. } => {
                AppError::Upstream(err.to_string())
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Compose(e) => e.into(),
            SessionError::League(e) => e.into(),
        }
    }
}
