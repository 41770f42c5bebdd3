//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;

fn scope_with_trials(trials: u64) -> SearchScope {
    let scope = SearchScope::new(100);
    for _ in 0..trials {
        scope.record_trial();
    }
    scope
}

#[test]
fn test_trial_count_termination() {
    let term = TrialCountTermination::new(3);

    assert!(!term.is_terminated(&scope_with_trials(0)));
    assert!(!term.is_terminated(&scope_with_trials(2)));
    assert!(term.is_terminated(&scope_with_trials(3)));
    assert!(term.is_terminated(&scope_with_trials(4)));
}

#[test]
fn test_time_termination() {
    let scope = SearchScope::new(1);

    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(Arc::clone(&flag));
    let scope = SearchScope::new(1);

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let term = OrTermination((TrialCountTermination::new(5), TimeTermination::seconds(3600)));

    assert!(!term.is_terminated(&scope_with_trials(4)));
    assert!(term.is_terminated(&scope_with_trials(5)));
}

#[test]
fn test_and_termination() {
    let term = AndTermination((TrialCountTermination::new(2), TrialCountTermination::new(5)));

    assert!(!term.is_terminated(&scope_with_trials(3)));
    assert!(term.is_terminated(&scope_with_trials(5)));
}

#[test]
fn test_boxed_composites() {
    let empty_or: OrTermination<Vec<Box<dyn Termination>>> = OrTermination::new(Vec::new());
    let empty_and: AndTermination<Vec<Box<dyn Termination>>> = AndTermination::new(Vec::new());
    let scope = scope_with_trials(10);
    assert!(!empty_or.is_terminated(&scope));
    assert!(!empty_and.is_terminated(&scope));

    let limits: Vec<Box<dyn Termination>> = vec![
        Box::new(TimeTermination::seconds(3600)),
        Box::new(TrialCountTermination::new(10)),
    ];
    let any = OrTermination::new(limits);
    assert!(any.is_terminated(&scope));
    assert!(!any.is_terminated(&scope_with_trials(9)));
}
