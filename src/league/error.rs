//! Error types for league service operations.
//!
//! All collaborator implementations share one error type with structured
//! context, so the service layer can tell retryable transport failures
//! apart from rejections without string matching.

use std::fmt;

/// Result type for league service operations
pub type LeagueResult<T> = Result<T, LeagueServiceError>;

/// Structured context for league service errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "list_available_teams")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "team", "fixture_batch")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for league service operations
#[derive(Debug, thiserror::Error)]
pub enum LeagueServiceError {
    /// Network/transport failures reaching the league platform.
    /// Typically transient and safe to retry by explicit operator action.
    #[error("Transport error: {message} {context}")]
    Transport {
        message: String,
        context: ErrorContext,
    },

    /// Requested entity (league, round, team) was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// The service returned data the engine cannot use.
    #[error("Invalid data: {message} {context}")]
    InvalidData {
        message: String,
        context: ErrorContext,
    },

    /// The service refused the request (e.g., the commit sink rejected
    /// a fixture batch).
    #[error("Rejected: {message} {context}")]
    Rejected {
        message: String,
        context: ErrorContext,
    },

    /// Timeout waiting for the league platform.
    #[error("Timeout error: {message} {context}")]
    Timeout {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl LeagueServiceError {
    /// Create a transport error (retryable).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create a transport error with full context.
    pub fn transport_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Transport {
            message: message.into(),
            context: context.retryable(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a rejection error with context.
    pub fn rejected_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Rejected {
            message: message.into(),
            context,
        }
    }

    /// Create a timeout error (retryable).
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { context, .. }
            | Self::NotFound { context, .. }
            | Self::InvalidData { context, .. }
            | Self::Rejected { context, .. }
            | Self::Timeout { context, .. }
            | Self::Internal { context, .. } => context.retryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_lists_populated_fields() {
        let context = ErrorContext::new("create_matchday")
            .with_entity("fixture_batch")
            .with_entity_id(42)
            .with_details("sink unreachable");
        let rendered = context.to_string();
        assert!(rendered.contains("operation=create_matchday"));
        assert!(rendered.contains("entity=fixture_batch"));
        assert!(rendered.contains("id=42"));
        assert!(rendered.contains("details=sink unreachable"));
    }

    #[test]
    fn test_transport_errors_are_retryable() {
        assert!(LeagueServiceError::transport("connection refused").is_retryable());
        assert!(LeagueServiceError::timeout("no response in 30s").is_retryable());
        assert!(!LeagueServiceError::rejected("duplicate fixture").is_retryable());
        assert!(!LeagueServiceError::not_found("league 9").is_retryable());
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = LeagueServiceError::transport_with_context(
            "connection refused",
            ErrorContext::new("list_played_pairs").with_entity("round"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("connection refused"));
        assert!(rendered.contains("operation=list_played_pairs"));
        assert!(rendered.contains("retryable=true"));
    }
}
