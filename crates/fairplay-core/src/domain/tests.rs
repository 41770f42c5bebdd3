//! Tests for schedule parsing and validation.

use super::*;
use crate::error::FairplayError;
use crate::test_utils::{eight_player_schedule, ids, reference_schedule, round};

#[test]
fn test_reference_schedule_parses_and_validates() {
    let schedule = reference_schedule();
    assert_eq!(schedule.round_count(), 10);
    assert_eq!(schedule.metadata.courts_per_round, 5);
    assert_eq!(schedule.iron_players(), ids(&[7, 14]).as_slice());

    let universe = schedule.validate().unwrap();
    assert_eq!(universe.len(), 22);
    assert_eq!(universe.to_vec(), ids(&(1..=22u32).collect::<Vec<u32>>()));
}

#[test]
fn test_court_lookup_is_one_based() {
    let schedule = reference_schedule();
    let court = schedule.court(1, 1).unwrap();
    assert_eq!(court.team1(), Team::new(PlayerId::new(14), PlayerId::new(11)));
    assert_eq!(court.team2(), Team::new(PlayerId::new(12), PlayerId::new(22)));

    assert!(schedule.court(1, 0).is_none());
    assert!(schedule.court(1, 6).is_none());
    assert!(schedule.round(0).is_none());
    assert!(schedule.round(11).is_none());
}

#[test]
fn test_courts_iterate_round_then_court() {
    let schedule = eight_player_schedule();
    let keys: Vec<(u32, u32)> = schedule.courts().map(|(r, c, _)| (r, c)).collect();
    assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]);
}

#[test]
fn test_json_round_trip_preserves_court_order() {
    let schedule = reference_schedule();
    let json = schedule.to_json_string().unwrap();
    let back = Schedule::from_json_str(&json).unwrap();
    assert_eq!(back, schedule);
    assert_eq!(back.court(3, 4), schedule.court(3, 4));
}

#[test]
fn test_court_serializes_as_flat_array() {
    let court = Court::from_ids([1, 2, 3, 4]);
    assert_eq!(serde_json::to_string(&court).unwrap(), "[1,2,3,4]");
}

#[test]
fn test_empty_schedule_rejected() {
    let schedule = Schedule::new(ScheduleMetadata::default(), vec![]);
    assert_eq!(schedule.validate(), Err(FairplayError::EmptySchedule));
}

#[test]
fn test_duplicate_on_court_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata::default(),
        vec![round(1, &[[1, 2, 2, 4]], &[3])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::DuplicateOnCourt {
            round: 1,
            court: 1,
            player: PlayerId::new(2),
        })
    );
}

#[test]
fn test_player_twice_in_round_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata::default(),
        vec![round(1, &[[1, 2, 3, 4], [5, 6, 7, 1]], &[8])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::DuplicateInRound {
            round: 1,
            player: PlayerId::new(1),
        })
    );
}

#[test]
fn test_bye_player_also_on_court_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata::default(),
        vec![round(1, &[[1, 2, 3, 4]], &[4])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::DuplicateInRound {
            round: 1,
            player: PlayerId::new(4),
        })
    );
}

#[test]
fn test_missing_player_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata::default(),
        vec![
            round(1, &[[1, 2, 3, 4]], &[5]),
            round(2, &[[1, 3, 2, 4]], &[]),
        ],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::MissingFromRound {
            round: 2,
            player: PlayerId::new(5),
        })
    );
}

#[test]
fn test_round_out_of_sequence_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata::default(),
        vec![round(2, &[[1, 2, 3, 4]], &[])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::RoundOutOfSequence {
            position: 1,
            found: 2,
        })
    );
}

#[test]
fn test_iron_player_on_bye_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata {
            iron_players: ids(&[5]),
            ..ScheduleMetadata::default()
        },
        vec![round(1, &[[1, 2, 3, 4]], &[5])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::IronPlayerOnBye {
            round: 1,
            player: PlayerId::new(5),
        })
    );
}

#[test]
fn test_unknown_iron_player_rejected() {
    let schedule = Schedule::new(
        ScheduleMetadata {
            iron_players: ids(&[99]),
            ..ScheduleMetadata::default()
        },
        vec![round(1, &[[1, 2, 3, 4]], &[])],
    );
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::UnknownPlayer(PlayerId::new(99)))
    );
}

#[test]
fn test_sizing_mismatch_rejected() {
    let mut schedule = eight_player_schedule();
    schedule.metadata.courts_per_round = 3;
    assert_eq!(
        schedule.validate(),
        Err(FairplayError::SizingMismatch {
            field: "courts per round",
            declared: 3,
            actual: 2,
        })
    );
}

#[test]
fn test_tier_partition_rejects_overlap_and_unknown() {
    let universe = eight_player_schedule().validate().unwrap();

    assert_eq!(
        TierPartition::from_ids(&[1, 2], &[2, 3], &universe),
        Err(FairplayError::OverlappingTiers(PlayerId::new(2)))
    );
    assert_eq!(
        TierPartition::from_ids(&[1, 42], &[3], &universe),
        Err(FairplayError::UnknownPlayer(PlayerId::new(42)))
    );
}

#[test]
fn test_tier_partition_middle_is_complement() {
    let universe = eight_player_schedule().validate().unwrap();
    let partition = TierPartition::from_ids(&[1, 5], &[8, 2], &universe).unwrap();

    assert_eq!(partition.middle(&universe), ids(&[3, 4, 6, 7]));
    assert_eq!(partition.tier_of(PlayerId::new(8)), Tier::Bottom);
    assert_eq!(partition.tier_of(PlayerId::new(3)), Tier::Middle);
}

#[test]
fn test_tier_partition_split() {
    let order = ids(&[4, 1, 7, 3, 2]);
    let partition = TierPartition::split(&order, 2, 2);
    assert_eq!(partition.top().iter().copied().collect::<Vec<_>>(), ids(&[1, 4]));
    assert_eq!(partition.bottom().iter().copied().collect::<Vec<_>>(), ids(&[3, 7]));
}

#[test]
fn test_match_result_rejects_tie_and_missing_score() {
    let team1 = Team::new(PlayerId::new(1), PlayerId::new(2));
    let team2 = Team::new(PlayerId::new(3), PlayerId::new(4));

    let tied = MatchResult::new(1, 1, team1, team2, 11, 11);
    assert_eq!(
        tied.decided_scores(),
        Err(FairplayError::TiedScore {
            round: 1,
            court: 1,
            score: 11,
        })
    );

    let mut missing = MatchResult::new(1, 1, team1, team2, 11, 7);
    missing.team2_score = None;
    assert_eq!(
        missing.decided_scores(),
        Err(FairplayError::MissingScore { round: 1, court: 1 })
    );
}

#[test]
fn test_match_result_json_uses_camel_case() {
    let json = r#"[{"round": 2, "court": 3, "team1": [1, 2], "team2": [3, 4], "team1Score": 11}]"#;
    let results = MatchResult::list_from_json_str(json).unwrap();
    assert_eq!(results[0].key(), MatchKey::new(2, 3));
    assert_eq!(results[0].team1_score, Some(11));
    assert_eq!(results[0].team2_score, None);
}

#[test]
fn test_team_membership_ignores_order() {
    let a = Team::new(PlayerId::new(1), PlayerId::new(2));
    let b = Team::new(PlayerId::new(2), PlayerId::new(1));
    assert!(a.same_members(&b));
    assert_eq!(a.partner_of(PlayerId::new(2)), Some(PlayerId::new(1)));
    assert_eq!(a.partner_of(PlayerId::new(3)), None);
}
