//! Public API surface for the matchday composition backend.
//!
//! This file consolidates the identifier newtypes and DTO types shared by the
//! engine, the league-service contracts, and the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Team identifier (stable, assigned by the league service).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TeamId(pub i64);

/// League identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueId(pub i64);

/// Round ("vuelta") number within a league season, starting at 1.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Round(pub u32);

impl TeamId {
    pub fn new(value: i64) -> Self {
        TeamId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl LeagueId {
    pub fn new(value: i64) -> Self {
        LeagueId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Round {
    pub fn new(value: u32) -> Self {
        Round(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for LeagueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

/// Team roster entry, supplied by the league service.
///
/// Immutable for the duration of a composition session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Captain display name, when one is registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            captain: None,
        }
    }
}

/// Which side of a slot a team occupies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Unordered pair of two distinct teams, canonicalized to (lower, higher)
/// so `(A, B)` and `(B, A)` hash and compare identically.
///
/// This is the key for the "already played" and "scheduled this matchday"
/// sets; construction rejects a team paired with itself.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "(TeamId, TeamId)", into = "(TeamId, TeamId)")]
pub struct TeamPair {
    lower: TeamId,
    higher: TeamId,
}

impl TeamPair {
    pub fn new(a: TeamId, b: TeamId) -> Result<Self, String> {
        if a == b {
            return Err(format!("a team cannot be paired with itself (team {})", a));
        }
        let (lower, higher) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { lower, higher })
    }

    pub fn lower(&self) -> TeamId {
        self.lower
    }

    pub fn higher(&self) -> TeamId {
        self.higher
    }

    pub fn contains(&self, team: TeamId) -> bool {
        self.lower == team || self.higher == team
    }

    /// The other member of the pair, if `team` is one of the two.
    pub fn other(&self, team: TeamId) -> Option<TeamId> {
        if team == self.lower {
            Some(self.higher)
        } else if team == self.higher {
            Some(self.lower)
        } else {
            None
        }
    }
}

impl TryFrom<(TeamId, TeamId)> for TeamPair {
    type Error = String;

    fn try_from((a, b): (TeamId, TeamId)) -> Result<Self, Self::Error> {
        TeamPair::new(a, b)
    }
}

impl From<TeamPair> for (TeamId, TeamId) {
    fn from(pair: TeamPair) -> Self {
        (pair.lower, pair.higher)
    }
}

impl std::fmt::Display for TeamPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.higher)
    }
}

/// Matchday ("jornada") configuration.
///
/// Mutable only while the composer is in the Configuring state. All times
/// are wall-clock local to the venue; no timezone conversion is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchdayConfig {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// Requested number of match slots; clamped to the pairings still owed
    /// in the round when assignment begins.
    pub slot_count: u32,
    /// Match duration in minutes.
    pub match_minutes: u32,
    /// Rest interval between consecutive slots, in minutes.
    pub rest_minutes: u32,
    pub round: Round,
}

impl MatchdayConfig {
    /// Check the local invariants that gate the Configuring -> Assigning
    /// transition.
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_count < 1 {
            return Err("slot count must be at least 1".to_string());
        }
        if self.match_minutes < 1 {
            return Err("match duration must be at least 1 minute".to_string());
        }
        Ok(())
    }

    /// Minutes from one slot's kickoff to the next.
    pub fn slot_interval_minutes(&self) -> u32 {
        self.match_minutes + self.rest_minutes
    }
}

/// A single match placeholder within the matchday.
///
/// The kickoff time is derived from the configuration and is read-only;
/// the composer replaces the whole slot list when it regenerates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Zero-based position within the matchday.
    pub ordinal: usize,
    pub kickoff: NaiveDateTime,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
}

impl Slot {
    pub fn empty(ordinal: usize, kickoff: NaiveDateTime) -> Self {
        Self {
            ordinal,
            kickoff,
            home: None,
            away: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }

    /// The pair held by this slot, when both sides are set.
    ///
    /// Returns None for a partially filled slot. A filled slot always holds
    /// two distinct teams, so the pair construction cannot fail.
    pub fn pair(&self) -> Option<TeamPair> {
        match (self.home, self.away) {
            (Some(h), Some(a)) => TeamPair::new(h, a).ok(),
            _ => None,
        }
    }

    pub fn team_on(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn set_team(&mut self, side: Side, team: Option<TeamId>) {
        match side {
            Side::Home => self.home = team,
            Side::Away => self.away = team,
        }
    }
}

/// A committed, scheduled match handed to the league service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
    pub round: Round,
    pub kickoff: NaiveDateTime,
}

/// The committed output of one composition session.
///
/// Produced once from the filled slots and submitted to the league service
/// as a single batch; the checksum identifies the batch in logs so a
/// retried submission can be correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureBatch {
    pub league: LeagueId,
    pub fixtures: Vec<Fixture>,
    pub checksum: String,
}

/// Why a draft (or one of its slots) is not committable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    /// Two filled slots hold the same canonical pair.
    DuplicatePair,
    /// The pair already met in an earlier matchday of this round.
    AlreadyPlayedThisRound,
    /// The slot is missing one or both teams.
    SlotUnderfilled,
    /// The league service reports a team double-booked at this time.
    ExternalClash,
}

/// A single validation finding, specific enough for the operator to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftConflict {
    /// Slot ordinal the finding is anchored to, when it concerns one slot.
    pub slot: Option<usize>,
    /// The offending pair, when the finding concerns a pair.
    pub teams: Option<TeamPair>,
    pub reason: ConflictReason,
    pub description: String,
}

/// Validation verdict for an in-progress matchday draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every configured slot has both sides filled.
    pub complete: bool,
    /// No duplicate pairs, no already-played pairs, no external clashes.
    pub conflict_free: bool,
    pub conflicts: Vec<DraftConflict>,
    /// Draft revision this report was computed for. A report from an older
    /// revision can never authorize a commit.
    pub revision: u64,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.complete && self.conflict_free
    }
}

/// Double-booking record returned by the league service's schedule-conflict
/// check: the team is already committed to play at an overlapping time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleClash {
    pub team: TeamId,
    /// Date of the already-committed matchday the clash was found on.
    pub matchday_date: NaiveDate,
    pub kickoff: NaiveDateTime,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pair_canonicalization() {
        let ab = TeamPair::new(TeamId(7), TeamId(3)).unwrap();
        let ba = TeamPair::new(TeamId(3), TeamId(7)).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.lower(), TeamId(3));
        assert_eq!(ab.higher(), TeamId(7));
    }

    #[test]
    fn test_pair_rejects_self_pairing() {
        assert!(TeamPair::new(TeamId(5), TeamId(5)).is_err());
    }

    #[test]
    fn test_pair_membership() {
        let pair = TeamPair::new(TeamId(1), TeamId(2)).unwrap();
        assert!(pair.contains(TeamId(1)));
        assert!(pair.contains(TeamId(2)));
        assert!(!pair.contains(TeamId(3)));
        assert_eq!(pair.other(TeamId(1)), Some(TeamId(2)));
        assert_eq!(pair.other(TeamId(3)), None);
    }

    #[test]
    fn test_pair_serde_rejects_degenerate_input() {
        let result: Result<TeamPair, _> = serde_json::from_str("[4, 4]");
        assert!(result.is_err());
    }

    #[test]
    fn test_pair_serde_roundtrip_canonicalizes() {
        let json = "[9, 2]";
        let pair: TeamPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.lower(), TeamId(2));
        assert_eq!(serde_json::to_string(&pair).unwrap(), "[2,9]");
    }

    #[test]
    fn test_config_validation() {
        let config = MatchdayConfig {
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            slot_count: 0,
            match_minutes: 60,
            rest_minutes: 15,
            round: Round(1),
        };
        assert!(config.validate().is_err());

        let config = MatchdayConfig {
            slot_count: 2,
            ..config
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.slot_interval_minutes(), 75);
    }

    #[test]
    fn test_slot_pair_requires_both_sides() {
        let kickoff = NaiveDate::from_ymd_opt(2025, 3, 8)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let mut slot = Slot::empty(0, kickoff);
        assert!(slot.pair().is_none());
        assert!(!slot.is_filled());

        slot.set_team(Side::Home, Some(TeamId(1)));
        assert!(slot.pair().is_none());

        slot.set_team(Side::Away, Some(TeamId(2)));
        assert!(slot.is_filled());
        assert_eq!(
            slot.pair(),
            Some(TeamPair::new(TeamId(1), TeamId(2)).unwrap())
        );
    }

    #[test]
    fn test_report_validity() {
        let report = ValidationReport {
            complete: true,
            conflict_free: true,
            conflicts: vec![],
            revision: 3,
        };
        assert!(report.is_valid());

        let report = ValidationReport {
            conflict_free: false,
            ..report
        };
        assert!(!report.is_valid());
    }

    proptest! {
        #[test]
        fn prop_pair_symmetry(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            prop_assume!(a != b);
            let ab = TeamPair::new(TeamId(a), TeamId(b)).unwrap();
            let ba = TeamPair::new(TeamId(b), TeamId(a)).unwrap();
            prop_assert_eq!(ab, ba);
            prop_assert!(ab.lower() <= ab.higher());
        }
    }
}
