//! League service module: the engine's only external collaborators.
//!
//! The composition engine consumes four remote operations — roster listing,
//! round history, schedule-conflict checks, and the fixture-batch commit
//! sink — behind async traits, so the engine stays transport-agnostic
//! (HTTP/JSON, RPC, in-process). No local state is persisted; the draft
//! lives only for the duration of one composition session.
//!
//! The module includes:
//! - `service`: trait definitions for the four collaborator operations
//! - `error`: structured error type shared by all implementations
//! - `local`: in-memory implementation for unit testing and local development
//! - `factory`: factory for creating service instances
//! - `config`: TOML configuration file support

pub mod config;
pub mod error;
pub mod factory;
#[cfg(feature = "local-league")]
pub mod local;
pub mod service;

// Feature guard: at least one league backend must be available.
#[cfg(not(feature = "local-league"))]
compile_error!("Enable at least one league service backend feature.");

pub use config::LeagueConfig;
pub use error::{ErrorContext, LeagueResult, LeagueServiceError};
pub use factory::{LeagueBackendType, LeagueServiceFactory};
#[cfg(feature = "local-league")]
pub use local::LocalLeagueService;
pub use service::{
    ConflictSource, FixtureSink, LeagueService, RosterSource, RoundHistorySource,
};
