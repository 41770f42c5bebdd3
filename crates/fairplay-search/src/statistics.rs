//! Search statistics collection and reporting.

use std::time::Duration;

use crate::scope::SearchScope;

/// Summary of a finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Trials actually scored.
    pub trials_run: u64,
    /// Trials the full budget would have scored.
    pub total_trials: u64,
    /// Times a new best partition was recorded.
    pub improvements: u64,
    /// Wall-clock time of the run.
    pub duration: Duration,
    /// A termination condition stopped the run before the budget was spent.
    pub terminated_early: bool,
}

impl SearchStatistics {
    /// Snapshots the counters of a scope once its search has finished.
    pub fn from_scope(scope: &SearchScope) -> Self {
        Self {
            trials_run: scope.trial_count(),
            total_trials: scope.total_trials(),
            improvements: scope.improvement_count(),
            duration: scope.elapsed(),
            terminated_early: scope.is_partial(),
        }
    }

    /// Returns trials scored per second, 0 for runs too short to measure.
    pub fn trials_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.trials_run as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Fraction of the budget that ran, in `[0, 1]`.
    pub fn completion(&self) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            self.trials_run as f64 / self.total_trials as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scope() {
        let scope = SearchScope::new(4);
        scope.record_trial();
        scope.record_trial();
        scope.record_improvement();

        let stats = SearchStatistics::from_scope(&scope);
        assert_eq!(stats.trials_run, 2);
        assert_eq!(stats.total_trials, 4);
        assert_eq!(stats.improvements, 1);
        assert!(stats.terminated_early);
        assert!((stats.completion() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_run_is_not_early() {
        let scope = SearchScope::new(1);
        scope.record_trial();
        assert!(!SearchStatistics::from_scope(&scope).terminated_early);
    }

    #[test]
    fn test_trials_per_second() {
        let stats = SearchStatistics {
            trials_run: 1000,
            total_trials: 1000,
            improvements: 3,
            duration: Duration::from_millis(500),
            terminated_early: false,
        };
        assert_eq!(stats.trials_per_second(), 2000);

        let instant = SearchStatistics {
            duration: Duration::ZERO,
            ..stats
        };
        assert_eq!(instant.trials_per_second(), 0);
    }
}
