//! End-to-end engine scenario tests over the public library API.
//!
//! Walks the documented worked example: four teams, one pair already
//! played, a two-slot matchday at 19:00 with 60-minute matches and a
//! 15-minute rest interval.

use chrono::{NaiveDate, NaiveTime};
use liga_rust::api::{
    ConflictReason, LeagueId, MatchdayConfig, Round, Side, Team, TeamId, TeamPair,
};
use liga_rust::engine::composer::{ComposeError, MatchdayComposer, SessionInputs, WizardState};
use liga_rust::engine::validator::validate;

const A: TeamId = TeamId(1);
const B: TeamId = TeamId(2);
const C: TeamId = TeamId(3);
const D: TeamId = TeamId(4);

fn scenario_composer() -> MatchdayComposer {
    let inputs = SessionInputs {
        league: LeagueId(1),
        roster: vec![
            Team::new(A, "Atlantis"),
            Team::new(B, "Bahia"),
            Team::new(C, "Costa"),
            Team::new(D, "Delta"),
        ],
        played_pairs: vec![TeamPair::new(A, B).unwrap()],
        pairings_owed: 5,
    };
    let config = MatchdayConfig {
        date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
        start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        slot_count: 2,
        match_minutes: 60,
        rest_minutes: 15,
        round: Round(1),
    };
    MatchdayComposer::new(inputs, config)
}

#[test]
fn test_scenario_slot_times() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    let times: Vec<String> = composer
        .slots()
        .iter()
        .map(|s| s.kickoff.format("%H:%M").to_string())
        .collect();
    assert_eq!(times, vec!["19:00", "20:15"]);
}

#[test]
fn test_scenario_valid_assignment_and_commit_path() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    composer.assign_team(0, Side::Home, A).unwrap();
    composer.assign_team(0, Side::Away, C).unwrap();
    composer.assign_team(1, Side::Home, B).unwrap();
    composer.assign_team(1, Side::Away, D).unwrap();

    composer.begin_review().unwrap();
    let report = validate(&composer, &[]);
    assert!(report.complete);
    assert!(report.conflict_free);

    let batch = composer.prepare_batch(&report).unwrap();
    assert_eq!(batch.fixtures.len(), 2);
    assert_eq!(batch.fixtures[0].home, A);
    assert_eq!(batch.fixtures[0].away, C);
    assert_eq!(batch.fixtures[1].home, B);
    assert_eq!(batch.fixtures[1].away, D);
    assert!(batch.fixtures.iter().all(|f| f.round == Round(1)));

    composer.mark_committed().unwrap();
    assert_eq!(composer.state(), WizardState::Committed);
}

#[test]
fn test_scenario_duplicate_pair_rejected() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    composer.assign_team(0, Side::Home, A).unwrap();
    composer.assign_team(0, Side::Away, C).unwrap();

    // Trying to build (A,C) again in slot 1 must fail once one side is in.
    composer.assign_team(1, Side::Away, A).unwrap();
    let err = composer.assign_team(1, Side::Home, C).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::PairAlreadyScheduled { slot: 0, .. }
    ));
}

#[test]
fn test_scenario_candidates_exclude_scheduled_pair() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    composer.assign_team(0, Side::Home, A).unwrap();
    composer.assign_team(0, Side::Away, C).unwrap();
    composer.assign_team(1, Side::Away, A).unwrap();

    // Candidates to face A in slot 1: B is excluded (already played this
    // round), C is excluded ((A,C) is placed in slot 0), D remains.
    let candidates = composer.candidates(1, Side::Home).unwrap();
    assert_eq!(candidates, vec![D]);
}

#[test]
fn test_scenario_played_pair_never_offered() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    composer.assign_team(0, Side::Away, B).unwrap();
    let candidates = composer.candidates(0, Side::Home).unwrap();
    assert!(!candidates.contains(&A));
    assert_eq!(candidates, vec![C, D]);
}

#[test]
fn test_scenario_propagation_on_reassignment() {
    let mut composer = scenario_composer();
    composer.begin_assigning().unwrap();

    // Slot 0 holds (C,B); reassigning home to A, where (A,B) has already
    // been played, must clear the away side instead of keeping an invalid
    // pair in place.
    composer.assign_team(0, Side::Home, C).unwrap();
    composer.assign_team(0, Side::Away, B).unwrap();
    let outcome = composer.assign_team(0, Side::Home, A).unwrap();

    assert_eq!(outcome.cleared_opposite, Some(B));
    assert_eq!(composer.slots()[0].home, Some(A));
    assert_eq!(composer.slots()[0].away, None);

    let report = validate(&composer, &[]);
    assert!(!report.complete);
    assert!(report
        .conflicts
        .iter()
        .any(|c| c.reason == ConflictReason::SlotUnderfilled && c.slot == Some(0)));
}

#[test]
fn test_scenario_clamping_against_owed_pairings() {
    let inputs = SessionInputs {
        league: LeagueId(1),
        roster: vec![
            Team::new(A, "Atlantis"),
            Team::new(B, "Bahia"),
            Team::new(C, "Costa"),
            Team::new(D, "Delta"),
        ],
        played_pairs: vec![],
        pairings_owed: 3,
    };
    let config = MatchdayConfig {
        date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
        start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        slot_count: 5,
        match_minutes: 60,
        rest_minutes: 15,
        round: Round(1),
    };
    let mut composer = MatchdayComposer::new(inputs, config);
    composer.begin_assigning().unwrap();
    assert_eq!(composer.slots().len(), 3);
}
