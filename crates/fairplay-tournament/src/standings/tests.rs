//! Tests for standings aggregation

use std::sync::Arc;

use fairplay_core::{FairplayError, MatchResult, PlayerId, Team};
use fairplay_test::{eight_player_schedule, five_player_schedule, reference_schedule};

use super::*;

fn p(id: u32) -> PlayerId {
    PlayerId::new(id)
}

fn standings_for(schedule: Schedule) -> Standings {
    Standings::new(Arc::new(schedule)).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_wins_then_differential() {
    let mut standings = standings_for(eight_player_schedule());

    // Player 2: three wins, 40-20. Player 1: three wins, 37-22.
    standings.submit_score(1, 1, 15, 5).unwrap();
    standings.submit_score(1, 2, 11, 3).unwrap();
    standings.submit_score(2, 1, 11, 9).unwrap();
    standings.submit_score(2, 2, 13, 8).unwrap();
    standings.submit_score(3, 1, 11, 8).unwrap();
    standings.submit_score(3, 2, 12, 7).unwrap();

    let table = standings.compute_standings();
    assert_eq!(table[0].player, p(2));
    assert_eq!((table[0].wins, table[0].points_for, table[0].points_against), (3, 40, 20));
    assert_eq!(table[0].diff, 20);
    assert_eq!(table[1].player, p(1));
    assert_eq!((table[1].wins, table[1].diff), (3, 15));
    assert_eq!(table[0].rank, 1);
    assert_eq!(table[7].rank, 8);
}

#[test]
fn test_per_result_statistics() {
    let mut standings = standings_for(eight_player_schedule());
    standings.submit_score(1, 1, 11, 7).unwrap();

    let winner = standings.player_stat(p(1)).unwrap();
    assert_eq!((winner.matches, winner.wins, winner.losses), (1, 1, 0));
    assert_eq!((winner.points_for, winner.points_against), (11, 7));
    assert_eq!(winner.partners.iter().copied().collect::<Vec<_>>(), vec![p(2)]);
    assert_eq!(
        winner.opponents.iter().copied().collect::<Vec<_>>(),
        vec![p(3), p(4)]
    );

    let loser = standings.player_stat(p(4)).unwrap();
    assert_eq!((loser.wins, loser.losses), (0, 1));
    assert_eq!(loser.diff(), -4);

    let idle = standings.player_stat(p(5)).unwrap();
    assert_eq!(idle, PlayerStat::default());
    assert!(standings.player_stat(p(99)).is_none());
}

#[test]
fn test_resubmission_is_idempotent() {
    let mut standings = standings_for(reference_schedule());
    standings.submit_score(1, 3, 11, 6).unwrap();
    let once = standings.compute_standings();

    standings.submit_score(1, 3, 11, 6).unwrap();
    assert_eq!(standings.compute_standings(), once);
    assert_eq!(standings.result_count(), 1);
}

#[test]
fn test_resubmission_replaces() {
    let mut standings = standings_for(reference_schedule());
    standings.submit_score(1, 3, 11, 6).unwrap();
    standings.submit_score(1, 3, 4, 11).unwrap();

    // Court 3 of round 1 is (9, 4) vs (6, 7).
    let stat = standings.player_stat(p(9)).unwrap();
    assert_eq!((stat.matches, stat.wins, stat.losses), (1, 0, 1));
    assert_eq!((stat.points_for, stat.points_against), (4, 11));
    assert_eq!(standings.result(1, 3).unwrap().team1_score, Some(4));
}

#[test]
fn test_order_is_stable_and_complete() {
    let standings = standings_for(reference_schedule());
    let first = standings.compute_standings();

    assert_eq!(first, standings.compute_standings());
    assert_eq!(first.len(), 22);
    let players: Vec<u32> = first.iter().map(|s| s.player.get()).collect();
    assert_eq!(players, (1..=22).collect::<Vec<u32>>());
    assert!(first.iter().all(|s| s.matches == 0 && s.diff == 0));
    assert!(first[6].iron && first[13].iron);
}

#[test]
fn test_rejections_do_not_mutate() {
    let mut standings = standings_for(reference_schedule());
    standings.submit_score(2, 1, 11, 2).unwrap();
    let before = standings.compute_standings();

    let court = standings.schedule().court(1, 1).copied().unwrap();
    let missing = MatchResult {
        team2_score: None,
        ..MatchResult::new(1, 1, court.team1(), court.team2(), 11, 0)
    };
    let swapped = MatchResult::new(1, 1, court.team2(), court.team1(), 11, 2);

    let cases = [
        (
            MatchResult::new(1, 1, court.team1(), court.team2(), 9, 9),
            FairplayError::TiedScore {
                round: 1,
                court: 1,
                score: 9,
            },
        ),
        (missing, FairplayError::MissingScore { round: 1, court: 1 }),
        (
            MatchResult::new(11, 1, court.team1(), court.team2(), 11, 2),
            FairplayError::UnknownRound(11),
        ),
        (
            MatchResult::new(1, 6, court.team1(), court.team2(), 11, 2),
            FairplayError::UnknownCourt { round: 1, court: 6 },
        ),
        (
            MatchResult::new(1, 0, court.team1(), court.team2(), 11, 2),
            FairplayError::UnknownCourt { round: 1, court: 0 },
        ),
        (swapped, FairplayError::TeamMismatch { round: 1, court: 1 }),
    ];

    for (result, expected) in cases {
        assert_eq!(standings.record_result(result), Err(expected));
        assert_eq!(standings.compute_standings(), before);
        assert_eq!(standings.result_count(), 1);
    }
}

#[test]
fn test_team_order_within_team_is_ignored() {
    let mut standings = standings_for(eight_player_schedule());
    let result = MatchResult::new(
        1,
        1,
        Team::new(p(2), p(1)),
        Team::new(p(4), p(3)),
        11,
        5,
    );
    standings.record_result(result).unwrap();
    assert_eq!(standings.player_stat(p(1)).unwrap().wins, 1);
}

#[test]
fn test_results_from_json() {
    let mut standings = standings_for(five_player_schedule());
    let json = r#"[
        {"round": 1, "court": 1, "team1": [1, 2], "team2": [3, 5], "team1Score": 11, "team2Score": 4},
        {"round": 2, "court": 1, "team1": [5, 4], "team2": [1, 3], "team1Score": 7}
    ]"#;
    let results = MatchResult::list_from_json_str(json).unwrap();

    standings.record_result(results[0].clone()).unwrap();
    assert_eq!(
        standings.record_result(results[1].clone()),
        Err(FairplayError::MissingScore { round: 2, court: 1 })
    );
    assert_eq!(standings.result_count(), 1);
}

#[test]
fn test_byes_count_once_round_has_results() {
    let mut standings = standings_for(five_player_schedule());
    assert_eq!(standings.player_stat(p(4)).unwrap().byes, 0);

    standings.submit_score(1, 1, 11, 8).unwrap();
    assert_eq!(standings.player_stat(p(4)).unwrap().byes, 1);
    assert_eq!(standings.player_stat(p(2)).unwrap().byes, 0);

    standings.submit_score(2, 1, 11, 8).unwrap();
    assert_eq!(standings.player_stat(p(2)).unwrap().byes, 1);
    assert_eq!(standings.player_stat(p(5)).unwrap().byes, 0);
}

#[test]
fn test_submit_round_is_all_or_nothing() {
    let mut standings = standings_for(reference_schedule());

    assert_eq!(
        standings.submit_round(1, &[(11, 3), (11, 4), (11, 5), (6, 6), (11, 7)]),
        Err(FairplayError::TiedScore {
            round: 1,
            court: 4,
            score: 6,
        })
    );
    assert_eq!(standings.result_count(), 0);

    assert_eq!(
        standings.submit_round(1, &[(11, 3), (11, 4)]),
        Err(FairplayError::MissingScore { round: 1, court: 3 })
    );
    assert_eq!(
        standings.submit_round(1, &[(11, 3); 6]),
        Err(FairplayError::UnknownCourt { round: 1, court: 6 })
    );
    assert_eq!(
        standings.submit_round(12, &[]),
        Err(FairplayError::UnknownRound(12))
    );
    assert_eq!(standings.result_count(), 0);

    standings
        .submit_round(1, &[(11, 3), (11, 4), (11, 5), (6, 11), (11, 7)])
        .unwrap();
    assert_eq!(standings.result_count(), 5);
    assert!(standings.is_round_complete(1));
    assert!(!standings.is_round_complete(2));
    assert!(!standings.is_round_started(2));
}

#[test]
fn test_iron_display_scaling() {
    let mut standings = standings_for(five_player_schedule());
    // Court is (1, 2) vs (3, 5); player 5 is iron.
    standings.submit_score(1, 1, 5, 11).unwrap();

    let display = standings.compute_display_standings();
    assert_eq!(display[0].player, p(3));
    assert_eq!(display[1].player, p(5));

    let iron = &display[1];
    assert!(iron.iron);
    assert!(close(iron.wins, 0.9));
    assert!(close(iron.points_for, 9.9));
    assert!(close(iron.points_against, 4.5));
    assert!(close(iron.diff, 5.4));
    assert!(close(display[0].wins, 1.0));

    // Canonical counters are untouched.
    let canonical = standings.player_stat(p(5)).unwrap();
    assert_eq!((canonical.wins, canonical.points_for), (1, 11));
    let table = standings.compute_standings();
    assert_eq!(table.iter().find(|s| s.player == p(5)).unwrap().wins, 1);
}

#[test]
fn test_display_scaling_can_reorder() {
    let mut standings = standings_for(reference_schedule());
    // Round 2, Court 3 is (7, 12) vs (9, 19); player 7 is iron.
    standings.submit_score(2, 3, 11, 5).unwrap();

    let canonical: Vec<u32> = standings
        .compute_standings()
        .iter()
        .map(|s| s.player.get())
        .collect();
    assert_eq!(&canonical[..2], &[7, 12]);

    let display: Vec<u32> = standings
        .compute_display_standings()
        .iter()
        .map(|s| s.player.get())
        .collect();
    assert_eq!(&display[..2], &[12, 7]);
    assert_eq!(display.len(), 22);
}

#[test]
fn test_clear() {
    let mut standings = standings_for(five_player_schedule());
    standings.submit_score(1, 1, 11, 8).unwrap();
    standings.clear();
    assert_eq!(standings.result_count(), 0);
    assert_eq!(standings.player_stat(p(4)).unwrap().byes, 0);
}
