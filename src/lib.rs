//! # Liga Rust Backend
//!
//! Matchday composition engine for a volleyball-league platform.
//!
//! This crate implements the constraint-satisfaction core that lets an
//! operator assemble a valid matchday ("jornada") of fixtures for one round
//! ("vuelta") of a league: timed slot derivation, pairing-uniqueness
//! checks, team availability filtering, a guarded wizard state machine, and
//! the validation pass that gates commit. The remote league platform is
//! consumed behind async traits; the committed fixture batch is the only
//! external mutation.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and DTO types shared across layers
//! - [`models`]: wall-clock time helpers (venue-local, minute arithmetic)
//! - [`engine`]: pure composition logic and the wizard state machine
//! - [`league`]: league service contracts, errors, and implementations
//! - [`services`]: composition session orchestration (the async boundary)
//! - [`http`]: axum-based HTTP server exposing the wizard (feature-gated)
//!
//! ## Invariants worth knowing
//!
//! - A team pair meets at most once per round; the canonical [`api::TeamPair`]
//!   is the key everywhere.
//! - A team may play more than once per matchday; only the pair is unique.
//! - Slot kickoff times are derived, never stored authoritatively.
//! - Committing is the single external write and is never auto-retried.

pub mod api;

pub mod engine;

pub mod league;

pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
