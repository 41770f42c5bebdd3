//! Search-level scope shared by every trial of one run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Shared counters for a running search.
///
/// Every field is atomic so parallel workers can record trials through a
/// shared reference; termination conditions read the same counters.
#[derive(Debug)]
pub struct SearchScope {
    start_time: Instant,
    total_trials: u64,
    trial_count: AtomicU64,
    improvement_count: AtomicU64,
}

impl SearchScope {
    pub fn new(total_trials: u64) -> Self {
        Self {
            start_time: Instant::now(),
            total_trials,
            trial_count: AtomicU64::new(0),
            improvement_count: AtomicU64::new(0),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Trials the full budget would run.
    pub fn total_trials(&self) -> u64 {
        self.total_trials
    }

    /// Records a completed trial and returns the new count.
    pub fn record_trial(&self) -> u64 {
        self.trial_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn trial_count(&self) -> u64 {
        self.trial_count.load(Ordering::Relaxed)
    }

    pub fn record_improvement(&self) {
        self.improvement_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn improvement_count(&self) -> u64 {
        self.improvement_count.load(Ordering::Relaxed)
    }

    /// Whether fewer trials ran than the budget allows.
    pub fn is_partial(&self) -> bool {
        self.trial_count() < self.total_trials
    }
}
