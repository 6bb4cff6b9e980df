//! Integration tests for the composition session against the in-memory
//! league service: the full wizard flow, commit gating, and the retry path
//! after a failed sink call.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use liga_rust::api::{
    ConflictReason, LeagueId, MatchdayConfig, Round, ScheduleClash, Side, Team, TeamId, TeamPair,
};
use liga_rust::engine::composer::WizardState;
use liga_rust::league::{LeagueServiceError, LocalLeagueService};
use liga_rust::services::{CompositionSession, SessionError};

const LEAGUE: LeagueId = LeagueId(10);
const ROUND: Round = Round(1);

fn seeded_service() -> Arc<LocalLeagueService> {
    let service = Arc::new(LocalLeagueService::new());
    for (id, name) in [(1, "Atlantis"), (2, "Bahia"), (3, "Costa"), (4, "Delta")] {
        service.add_team(LEAGUE, Team::new(TeamId(id), name));
    }
    service.record_played_pair(
        LEAGUE,
        ROUND,
        TeamPair::new(TeamId(1), TeamId(2)).unwrap(),
    );
    service.set_pairings_owed(LEAGUE, ROUND, 5);
    service
}

fn config(slot_count: u32) -> MatchdayConfig {
    MatchdayConfig {
        date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
        start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        slot_count,
        match_minutes: 60,
        rest_minutes: 15,
        round: ROUND,
    }
}

async fn session_with_filled_draft(
    service: Arc<LocalLeagueService>,
) -> CompositionSession {
    let mut session = CompositionSession::open(service, LEAGUE, config(2))
        .await
        .unwrap();
    session.begin_assigning().unwrap();
    session.assign_team(0, Side::Home, TeamId(1)).unwrap();
    session.assign_team(0, Side::Away, TeamId(3)).unwrap();
    session.assign_team(1, Side::Home, TeamId(2)).unwrap();
    session.assign_team(1, Side::Away, TeamId(4)).unwrap();
    session.begin_review().unwrap();
    session
}

#[tokio::test]
async fn test_full_wizard_flow_commits_batch() {
    let service = seeded_service();
    let mut session = session_with_filled_draft(service.clone()).await;

    let report = session.validate().await.unwrap();
    assert!(report.is_valid());

    let batch = session.commit().await.unwrap();
    assert_eq!(session.state(), WizardState::Committed);
    assert_eq!(batch.fixtures.len(), 2);

    let committed = service.committed_batches();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].checksum, batch.checksum);
    assert!(committed[0].fixtures.iter().all(|f| f.round == ROUND));
}

#[tokio::test]
async fn test_commit_gated_on_incomplete_draft() {
    let service = seeded_service();
    let mut session = CompositionSession::open(service.clone(), LEAGUE, config(2))
        .await
        .unwrap();
    session.begin_assigning().unwrap();
    session.assign_team(0, Side::Home, TeamId(1)).unwrap();
    session.begin_review().unwrap();

    let err = session.commit().await.unwrap_err();
    assert!(matches!(err, SessionError::Compose(_)));
    // The sink must never have been invoked.
    assert!(service.committed_batches().is_empty());
    assert_eq!(session.state(), WizardState::Reviewing);
}

#[tokio::test]
async fn test_failed_sink_leaves_reviewing_and_allows_retry() {
    let service = seeded_service();
    let mut session = session_with_filled_draft(service.clone()).await;
    service.fail_next_commit("league platform unreachable");

    let err = session.commit().await.unwrap_err();
    match err {
        SessionError::League(e) => assert!(e.is_retryable()),
        other => panic!("expected a league error, got {:?}", other),
    }
    assert_eq!(session.state(), WizardState::Reviewing);
    assert!(service.committed_batches().is_empty());

    // Retrying is an explicit operator action and now succeeds.
    session.commit().await.unwrap();
    assert_eq!(session.state(), WizardState::Committed);
    assert_eq!(service.committed_batches().len(), 1);
}

#[tokio::test]
async fn test_external_clash_blocks_commit() {
    let service = seeded_service();
    let kickoff = NaiveDate::from_ymd_opt(2025, 3, 8)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap();
    service.add_clash(
        LEAGUE,
        ScheduleClash {
            team: TeamId(1),
            matchday_date: kickoff.date(),
            kickoff,
            description: "Atlantis already plays matchday 3 at 19:00".to_string(),
        },
    );
    let mut session = session_with_filled_draft(service.clone()).await;

    let report = session.validate().await.unwrap();
    assert!(report.complete);
    assert!(!report.conflict_free);
    assert!(report
        .conflicts
        .iter()
        .any(|c| c.reason == ConflictReason::ExternalClash));

    let err = session.commit().await.unwrap_err();
    assert!(matches!(err, SessionError::Compose(_)));
    assert!(service.committed_batches().is_empty());
}

#[tokio::test]
async fn test_slot_count_clamped_by_remote_owed_count() {
    let service = seeded_service();
    service.set_pairings_owed(LEAGUE, ROUND, 1);

    let mut session = CompositionSession::open(service, LEAGUE, config(3))
        .await
        .unwrap();
    session.begin_assigning().unwrap();
    assert_eq!(session.slots().len(), 1);
}

#[tokio::test]
async fn test_candidates_reflect_round_history() {
    let service = seeded_service();
    let mut session = CompositionSession::open(service, LEAGUE, config(2))
        .await
        .unwrap();
    session.begin_assigning().unwrap();
    session.assign_team(0, Side::Away, TeamId(2)).unwrap();

    // (1,2) played in an earlier matchday: 1 is not offered against 2.
    let candidates = session.candidates(0, Side::Home).unwrap();
    assert_eq!(candidates, vec![TeamId(3), TeamId(4)]);
}

#[tokio::test]
async fn test_discard_resets_and_writes_nothing() {
    let service = seeded_service();
    let mut session = session_with_filled_draft(service.clone()).await;

    session.discard().unwrap();
    assert_eq!(session.state(), WizardState::Configuring);
    assert!(session.slots().is_empty());
    assert!(session.last_report().is_none());
    assert!(service.committed_batches().is_empty());
}

#[tokio::test]
async fn test_open_surfaces_league_errors() {
    let service = Arc::new(LocalLeagueService::new());
    let err = CompositionSession::open(service, LeagueId(99), config(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::League(LeagueServiceError::NotFound { .. })
    ));
}
