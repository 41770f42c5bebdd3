//! Test utilities for fairplay-core
//!
//! Provides common schedule fixtures used across the crate's test modules.

use crate::domain::{Court, PlayerId, Round, Schedule, ScheduleMetadata};

/// The 22-player, 10-round reference schedule shared with `fairplay-test`.
pub const REFERENCE_SCHEDULE_JSON: &str =
    include_str!("../../fairplay-test/data/reference_22p.json");

pub fn reference_schedule() -> Schedule {
    Schedule::from_json_str(REFERENCE_SCHEDULE_JSON).expect("reference schedule parses")
}

pub fn ids(raw: &[u32]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId::new).collect()
}

/// Builds a round from raw court arrays and bye ids.
pub fn round(number: u32, courts: &[[u32; 4]], byes: &[u32]) -> Round {
    Round::new(
        number,
        courts.iter().copied().map(Court::from_ids).collect(),
        ids(byes),
    )
}

/// Single court `[1, 2, 3, 4]` in one round, no byes.
pub fn single_court_schedule() -> Schedule {
    Schedule::new(
        ScheduleMetadata::default(),
        vec![round(1, &[[1, 2, 3, 4]], &[])],
    )
}

/// Eight players, two courts per round, three rounds, no byes.
pub fn eight_player_schedule() -> Schedule {
    Schedule::new(
        ScheduleMetadata {
            players: 8,
            rounds: 3,
            courts_per_round: 2,
            ..ScheduleMetadata::default()
        },
        vec![
            round(1, &[[1, 2, 3, 4], [5, 6, 7, 8]], &[]),
            round(2, &[[1, 3, 5, 7], [2, 4, 6, 8]], &[]),
            round(3, &[[1, 4, 6, 7], [2, 3, 5, 8]], &[]),
        ],
    )
}
