//! Matchday composition engine.
//!
//! Pure, synchronous domain logic: no I/O, no clocks, no external calls.
//! The engine is organized the way the matchday wizard works:
//!
//! - [`registry`]: which pairs have already met in the active round
//!   (externally recorded plus tentatively placed in the current draft)
//! - [`slots`]: derivation of slot kickoff times from the configuration
//! - [`availability`]: which teams are still offerable for a slot side
//! - [`composer`]: the draft itself and its wizard state machine
//! - [`validator`]: the completeness/conflict verdict that gates commit
//!
//! External data (roster, played pairs, pairings owed, schedule clashes)
//! enters through [`composer::SessionInputs`] and the validator's clash
//! argument; fetching it is the service layer's job.

pub mod availability;
pub mod composer;
pub mod registry;
pub mod slots;
pub mod validator;

pub use availability::{
    candidates_for_slot_side, eligible_opponents, has_eligible_opponent,
    teams_with_eligible_opponent,
};
pub use composer::{
    AssignmentOutcome, ComposeError, MatchdayComposer, SessionInputs, WizardState,
};
pub use registry::{scheduled_pairs, MatchupRegistry, RegistryView};
pub use slots::generate_slots;
pub use validator::validate;
