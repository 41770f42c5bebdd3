//! Fairplay tournament state
//!
//! - [`Standings`] - replay-derived player statistics and ranked leaderboards
//! - [`Tournament`] - one schedule with its pairing history, standings and
//!   current round
//! - [`TournamentRegistry`] - isolated tournaments keyed by environment id

pub mod registry;
pub mod standings;
pub mod tournament;

pub use registry::TournamentRegistry;
pub use standings::{DisplayStanding, Standing, Standings, IRON_DISPLAY_FACTOR};
pub use tournament::{Tournament, TournamentSnapshot};
