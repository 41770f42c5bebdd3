//! Tests for tournament state

use fairplay_core::{PlayerId, ScheduleMetadata};
use fairplay_test::{five_player_schedule, reference_schedule, round};

use super::*;

#[test]
fn test_starts_at_round_one() {
    let tournament = Tournament::new(reference_schedule()).unwrap();

    assert_eq!(tournament.current_round(), 1);
    assert_eq!(tournament.total_rounds(), 10);
    let data = tournament.current_round_data();
    assert_eq!(data.round, 1);
    assert_eq!(data.bye_players, vec![PlayerId::new(19), PlayerId::new(21)]);
    assert_eq!(tournament.history().rounds_recorded(), 10);
}

#[test]
fn test_advance_until_last_round() {
    let mut tournament = Tournament::new(reference_schedule()).unwrap();

    for expected in 2..=10 {
        assert_eq!(tournament.advance_round().unwrap(), expected);
    }
    assert!(tournament.is_final_round());
    assert!(matches!(
        tournament.advance_round(),
        Err(FairplayError::InvalidState(_))
    ));
    assert_eq!(tournament.current_round(), 10);
}

#[test]
fn test_select_round() {
    let mut tournament = Tournament::new(reference_schedule()).unwrap();

    tournament.select_round(4).unwrap();
    assert_eq!(tournament.current_round_data().round, 4);
    assert_eq!(
        tournament.select_round(0),
        Err(FairplayError::UnknownRound(0))
    );
    assert_eq!(
        tournament.select_round(11),
        Err(FairplayError::UnknownRound(11))
    );
    assert_eq!(tournament.current_round(), 4);
}

#[test]
fn test_malformed_schedule_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata {
            iron_players: vec![PlayerId::new(4)],
            ..ScheduleMetadata::default()
        },
        vec![round(1, &[[1, 2, 3, 5]], &[4])],
    );
    assert_eq!(
        Tournament::new(schedule).unwrap_err(),
        FairplayError::IronPlayerOnBye {
            round: 1,
            player: PlayerId::new(4),
        }
    );
}

#[test]
fn test_complete_after_every_court() {
    let mut tournament = Tournament::new(five_player_schedule()).unwrap();
    assert!(!tournament.is_complete());

    tournament.submit_round(1, &[(11, 4)]).unwrap();
    assert!(!tournament.is_complete());
    tournament.submit_score(2, 1, 9, 11).unwrap();
    assert!(tournament.is_complete());

    let stats = tournament.player_stats();
    assert_eq!(stats[&PlayerId::new(1)].matches, 2);
    assert_eq!(stats[&PlayerId::new(4)].byes, 1);
    assert_eq!(tournament.compute_display_standings().len(), 5);
}

#[test]
fn test_snapshot_serializes() {
    let mut tournament = Tournament::new(five_player_schedule()).unwrap();
    tournament.submit_score(1, 1, 11, 6).unwrap();
    tournament.advance_round().unwrap();

    let snapshot = tournament.snapshot();
    assert_eq!(snapshot.current_round, 2);
    assert_eq!(snapshot.total_rounds, 2);
    assert_eq!(snapshot.results.len(), 1);
    assert_eq!(snapshot.standings.len(), 5);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["currentRound"], 2);
    assert_eq!(json["currentRoundData"]["byePlayers"][0], 2);
    assert_eq!(json["results"][0]["team1Score"], 11);
    assert_eq!(json["standings"][0]["pointsFor"], 11);
}
