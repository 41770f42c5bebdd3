//! Fairplay - a doubles tournament fairness engine
//!
//! Checks a fixed doubles schedule for fairness and keeps tournament
//! standings:
//! - pairing history (how often any two players partner or oppose)
//! - tier violation scoring and a seeded search for the best tier split
//! - replay-derived standings with iron-player display scaling
//!
//! # Example
//!
//! ```rust
//! use fairplay::prelude::*;
//!
//! let schedule = Schedule::new(
//!     ScheduleMetadata::default(),
//!     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![])],
//! );
//!
//! let history = PairingHistory::build(&schedule).unwrap();
//! assert_eq!(history.partner_count(PlayerId::new(1), PlayerId::new(2)), 1);
//!
//! let report = analyze_tier(&schedule, &[PlayerId::new(1)], &[PlayerId::new(3)]).unwrap();
//! assert_eq!(report.good_matchup_count, 1);
//! ```

// Schedule model and scoring
pub use fairplay_core::{
    analyze_tier, Court, CourtNumber, FairplayError, GoodMatchup, MatchKey, MatchResult,
    PairCounts, PairingHistory, PlayerId, PlayerPair, PlayerStat, PlayerUniverse, Result, Round,
    RoundNumber, Schedule, ScheduleMetadata, Team, Tier, TierAnalyzer, TierPartition, TierScore,
    TierViolation, ViolationReport,
};

// Configuration
pub use fairplay_config::{
    ConfigError, EnvironmentMode, FairplayConfig, SearchConfig, TerminationConfig, ThreadCount,
};

// Tier search
pub use fairplay_search::{
    search_best_partition, termination, BestPartition, SearchOutcome, SearchStatistics,
    SizeRange, TierSearch, TrialRef,
};

// Tournament state
pub use fairplay_tournament::{
    DisplayStanding, Standing, Standings, Tournament, TournamentRegistry, TournamentSnapshot,
    IRON_DISPLAY_FACTOR,
};

#[cfg(feature = "console")]
pub use fairplay_console as console;

mod search;
pub use search::{run_search, CONFIG_FILE};

pub mod prelude {
    pub use super::{analyze_tier, search_best_partition, run_search};
    pub use super::{
        Court, FairplayError, MatchResult, PairingHistory, PlayerId, Result, Round, Schedule,
        ScheduleMetadata, Team, TierPartition,
    };
    pub use super::{FairplayConfig, SizeRange, TierSearch};
    pub use super::{Standings, Tournament, TournamentRegistry};
}
