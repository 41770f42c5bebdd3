//! Fairplay tier partition search
//!
//! This crate searches for a top/middle/bottom split of a schedule's players
//! that minimizes same-tier partnerships:
//! - [`search_best_partition`] - sequential search driven by a caller-supplied RNG
//! - [`TierSearch`] - configured runner with seeding, rayon parallelism and
//!   termination conditions
//! - [`termination`] - wall-clock, trial-count and external-flag cancellation
//! - [`SearchStatistics`] - trial counts and throughput for a finished run

pub mod plan;
pub mod scope;
pub mod search;
pub mod solver;
pub mod statistics;
pub mod termination;

mod parallel;

pub use plan::{SizeRange, TrialRef};
pub use scope::SearchScope;
pub use search::{search_best_partition, BestPartition};
pub use solver::{SearchOutcome, TierSearch};
pub use statistics::SearchStatistics;
pub use termination::{
    AndTermination, ExternalTermination, OrTermination, Termination, TimeTermination,
    TrialCountTermination,
};
