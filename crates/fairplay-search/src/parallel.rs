//! Seeded unit execution, sequential or over rayon.
//!
//! Unit `i` shuffles with a ChaCha8 generator seeded from the search seed on
//! stream `i`, so its partition depends only on `(seed, i)`. Workers share a
//! single packed `(violations, unit)` key and keep the minimum with
//! `fetch_min`, which selects the fewest violations and then the lowest unit
//! regardless of thread count or scheduling.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use fairplay_core::{PlayerId, Result, TierAnalyzer, TierPartition};

use crate::plan::TrialPlan;
use crate::scope::SearchScope;
use crate::search::{finish, log_improvement, BestPartition};
use crate::termination::Termination;

const NO_BEST: u64 = u64::MAX;
const UNIT_MASK: u64 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Execution {
    Sequential,
    Parallel,
}

/// Lowest `(violations, unit)` seen so far, packed into one word.
#[derive(Debug)]
pub(crate) struct BestKey(AtomicU64);

impl BestKey {
    pub(crate) fn new() -> Self {
        Self(AtomicU64::new(NO_BEST))
    }

    fn pack(violations: u32, unit: u64) -> u64 {
        (u64::from(violations) << 32) | (unit & UNIT_MASK)
    }

    /// Offers a scored unit; returns true if it became the best.
    pub(crate) fn offer(&self, violations: u32, unit: u64) -> bool {
        let key = Self::pack(violations, unit);
        self.0.fetch_min(key, Ordering::AcqRel) > key
    }

    pub(crate) fn unit(&self) -> Option<u64> {
        let key = self.0.load(Ordering::Acquire);
        (key != NO_BEST).then_some(key & UNIT_MASK)
    }
}

pub(crate) fn unit_rng(seed: u64, unit: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(unit);
    rng
}

/// Draws the partition for one unit.
pub(crate) fn draw(players: &[PlayerId], plan: &TrialPlan, seed: u64, unit: u64) -> TierPartition {
    let mut rng = unit_rng(seed, unit);
    let mut order = players.to_vec();
    order.shuffle(&mut rng);
    let (top_size, bottom_size) = plan.sizes_of(unit);
    TierPartition::split(&order, top_size, bottom_size)
}

pub(crate) fn run_units(
    analyzer: &TierAnalyzer<'_>,
    plan: &TrialPlan,
    seed: u64,
    scope: &SearchScope,
    termination: &dyn Termination,
    execution: Execution,
) -> Result<BestPartition> {
    let players = analyzer.universe().to_vec();
    let best = BestKey::new();

    let run_unit = |unit: u64| -> Option<()> {
        if termination.is_terminated(scope) {
            return None;
        }
        let partition = draw(&players, plan, seed, unit);
        let score = analyzer.score(&partition);
        scope.record_trial();
        if best.offer(score.violations, unit) {
            scope.record_improvement();
            log_improvement(plan, unit, score);
        }
        Some(())
    };

    // `None` means a termination condition stopped the run.
    let _ = match execution {
        Execution::Sequential => (0..plan.unit_count()).try_for_each(&run_unit),
        Execution::Parallel => (0..plan.unit_count()).into_par_iter().try_for_each(&run_unit),
    };

    let winner = best.unit().map(|unit| (draw(&players, plan, seed, unit), unit));
    finish(analyzer, plan, winner)
}
