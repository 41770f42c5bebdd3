//! Composite termination conditions (AND/OR).
//!
//! Tuples compose a fixed set of conditions; `Vec<Box<dyn Termination>>`
//! composes a set assembled at runtime (for example from configuration).

use super::Termination;
use crate::scope::SearchScope;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// # Examples
///
/// ```
/// use fairplay_search::{OrTermination, TimeTermination, TrialCountTermination};
///
/// // Terminate after 30 seconds OR 1000 trials
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     TrialCountTermination::new(1000),
/// ));
/// ```
///
/// An empty `Vec` never terminates.
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple or vector of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Combines multiple terminations with AND logic (all must terminate).
///
/// An empty `Vec` never terminates.
#[derive(Debug)]
pub struct AndTermination<T>(pub T);

impl<T> AndTermination<T> {
    /// Creates a new AND termination from a tuple or vector of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR and AND tuples.
macro_rules! impl_tuple_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }

        impl<$($T),+> Termination for AndTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))&&+
            }
        }
    };
}

impl_tuple_termination!(0: T0);
impl_tuple_termination!(0: T0, 1: T1);
impl_tuple_termination!(0: T0, 1: T1, 2: T2);
impl_tuple_termination!(0: T0, 1: T1, 2: T2, 3: T3);

impl Termination for OrTermination<Vec<Box<dyn Termination>>> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.0.iter().any(|t| t.is_terminated(scope))
    }
}

impl Termination for AndTermination<Vec<Box<dyn Termination>>> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        !self.0.is_empty() && self.0.iter().all(|t| t.is_terminated(scope))
    }
}
