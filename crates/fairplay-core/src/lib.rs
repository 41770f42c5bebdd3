//! Fairplay Core - schedule model and fairness scoring
//!
//! This crate provides the fundamental pieces for checking a doubles schedule:
//! - Domain types for schedules, rounds, courts, teams and results
//! - Structural validation of a schedule against its player universe
//! - The pairing history index (partner/opponent meeting counts)
//! - The tier violation scorer

pub mod analysis;
pub mod domain;
pub mod error;
pub mod history;

#[cfg(test)]
pub(crate) mod test_utils;


pub use analysis::{
    analyze_tier, GoodMatchup, TierAnalyzer, TierScore, TierViolation, ViolationReport,
};
pub use domain::{
    Court, CourtNumber, MatchKey, MatchResult, PlayerId, PlayerStat, PlayerUniverse, Round,
    RoundNumber, Schedule, ScheduleMetadata, Team, Tier, TierPartition,
};
pub use error::{FairplayError, Result};
pub use history::{PairCounts, PairingHistory, PlayerPair};
