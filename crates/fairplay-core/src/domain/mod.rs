//! Domain model for doubles schedules
//!
//! - `Schedule`: immutable rounds of courts plus byes, with metadata
//! - `TierPartition`: top/bottom tier split; the middle tier is derived
//! - `MatchResult` / `PlayerStat`: submitted scores and derived statistics

mod player;
mod result;
mod schedule;
mod tier;

pub use player::{PlayerId, PlayerUniverse};
pub use result::{MatchKey, MatchResult, PlayerStat};
pub use schedule::{Court, Round, Schedule, ScheduleMetadata, Team};
pub use tier::{Tier, TierPartition};

/// 1-based round number as it appears in schedule documents.
pub type RoundNumber = u32;

/// 1-based court position within a round.
pub type CourtNumber = u32;

#[cfg(test)]
mod tests;
