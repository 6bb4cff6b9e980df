//! League service factory for dependency injection.
//!
//! Creates service instances from runtime configuration, so the binary and
//! tests pick a backend without hard-wiring a type.

use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "local-league")]
use super::local::LocalLeagueService;
use super::config::LeagueConfig;
use super::error::{LeagueResult, LeagueServiceError};
use super::service::LeagueService;

/// League service backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueBackendType {
    /// In-memory local service
    Local,
}

impl FromStr for LeagueBackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown league backend: {}", s)),
        }
    }
}

impl LeagueBackendType {
    /// Backend from the `LEAGUE_BACKEND` environment variable, falling
    /// back to the local service.
    pub fn from_env() -> Self {
        std::env::var("LEAGUE_BACKEND")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Factory for creating league service instances.
pub struct LeagueServiceFactory;

impl LeagueServiceFactory {
    /// Create a league service based on backend type.
    pub fn create(backend: LeagueBackendType) -> LeagueResult<Arc<dyn LeagueService>> {
        match backend {
            LeagueBackendType::Local => {
                #[cfg(feature = "local-league")]
                {
                    Ok(Arc::new(LocalLeagueService::new()) as Arc<dyn LeagueService>)
                }
                #[cfg(not(feature = "local-league"))]
                {
                    Err(LeagueServiceError::internal(
                        "local league service feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create a league service from a configuration file's settings.
    pub fn from_config(config: &LeagueConfig) -> LeagueResult<Arc<dyn LeagueService>> {
        let backend = config
            .league
            .backend
            .parse()
            .map_err(LeagueServiceError::invalid_data)?;
        Self::create(backend)
    }

    /// Create a local in-memory league service directly.
    #[cfg(feature = "local-league")]
    pub fn create_local() -> Arc<LocalLeagueService> {
        Arc::new(LocalLeagueService::new())
    }
}
