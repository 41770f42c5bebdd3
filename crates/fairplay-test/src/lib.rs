//! Shared test fixtures for Fairplay crates.
//!
//! - [`reference_schedule`] - the 22-player, 10-round schedule with two iron
//!   players that the tier analysis is calibrated against
//! - [`eight_player_schedule`] - a small three-round schedule without byes
//! - [`round`] / [`ids`] - builders for hand-written schedules
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! fairplay-test = { workspace = true }
//! ```

use fairplay_core::{Court, MatchResult, PlayerId, Round, Schedule, ScheduleMetadata};

/// JSON source of the reference schedule.
pub const REFERENCE_SCHEDULE_JSON: &str = include_str!("../data/reference_22p.json");

/// The 22-player reference schedule (players 1..=22, iron players 7 and 14).
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

/// Five players, one court per round, one bye per round, player 5 iron.
pub fn five_player_schedule() -> Schedule {
    Schedule::new(
        ScheduleMetadata {
            players: 5,
            rounds: 2,
            courts_per_round: 1,
            byes_per_round: 1,
            iron_players: ids(&[5]),
            ..ScheduleMetadata::default()
        },
        vec![
            round(1, &[[1, 2, 3, 5]], &[4]),
            round(2, &[[5, 4, 1, 3]], &[2]),
        ],
    )
}

/// Result for a scheduled court, teams taken from the schedule.
pub fn scheduled_result(
    schedule: &Schedule,
    round: u32,
    court: u32,
    team1_score: u32,
    team2_score: u32,
) -> MatchResult {
    let c = schedule
        .court(round, court)
        .expect("fixture references a scheduled court");
    MatchResult::new(round, court, c.team1(), c.team2(), team1_score, team2_score)
}
