//! Service layer for business logic and orchestration.
//!
//! Sits between the transport layer (HTTP handlers, CLI) and the engine:
//! it owns the async boundary to the league service and feeds the pure
//! composer with session-scoped data.

pub mod session;

pub use session::{CompositionSession, SessionError};
