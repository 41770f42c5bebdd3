//! Trial count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once a number of trials has been scored.
///
/// Parallel workers may finish trials already in flight, so a parallel run
/// can overshoot the limit by up to one trial per thread.
///
/// # Example
///
/// ```
/// use fairplay_search::TrialCountTermination;
///
/// // Terminate after 1000 trials
/// let term = TrialCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct TrialCountTermination {
    limit: u64,
}

impl TrialCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for TrialCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.trial_count() >= self.limit
    }
}
