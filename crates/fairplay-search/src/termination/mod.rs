//! Termination conditions for the tier search.
//!
//! Termination only cancels: a search that stops early still returns the best
//! partition found so far. Conditions are checked before each trial.

mod composite;
mod external;
mod time;
mod trial_count;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use time::TimeTermination;
pub use trial_count::TrialCountTermination;

/// Trait for determining when to stop searching.
///
/// Implementations are shared by every worker of a parallel search, hence the
/// `Sync` bound.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the search should stop before its next trial.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        (**self).is_terminated(scope)
    }
}

#[cfg(test)]
mod tests;
