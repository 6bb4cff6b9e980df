//! League service configuration file support.
//!
//! Reads the backend selection (and its tunables) from a TOML file, so
//! deployments can switch implementations without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{ErrorContext, LeagueResult, LeagueServiceError};

/// League service configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub league: LeagueSettings,
}

/// Backend selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    /// Backend identifier ("local").
    pub backend: String,
    /// Request timeout for remote backends, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl LeagueConfig {
    /// Load league service configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> LeagueResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LeagueServiceError::not_found_with_context(
                format!("cannot read league config: {}", e),
                ErrorContext::new("load_config").with_details(path.display().to_string()),
            )
        })?;
        toml::from_str(&contents).map_err(|e| {
            LeagueServiceError::invalid_data(format!(
                "malformed league config {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            league: LeagueSettings {
                backend: "local".to_string(),
                request_timeout: default_request_timeout(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[league]\nbackend = \"local\"\nrequest_timeout = 5").unwrap();

        let config = LeagueConfig::from_file(file.path()).unwrap();
        assert_eq!(config.league.backend, "local");
        assert_eq!(config.league.request_timeout, 5);
    }

    #[test]
    fn test_request_timeout_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[league]\nbackend = \"local\"").unwrap();

        let config = LeagueConfig::from_file(file.path()).unwrap();
        assert_eq!(config.league.request_timeout, 30);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = LeagueConfig::from_file("/nonexistent/liga.toml").unwrap_err();
        assert!(matches!(err, LeagueServiceError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_file_is_invalid_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "league = \"not a table\"").unwrap();

        let err = LeagueConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LeagueServiceError::InvalidData { .. }));
    }
}
