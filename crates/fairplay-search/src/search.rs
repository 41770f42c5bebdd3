//! Sequential tier partition search.
//!
//! Every trial shuffles the schedule's players with the supplied RNG, takes
//! the first `top_size` as the top tier and the next `bottom_size` as the
//! bottom tier, and scores the split. The partition with strictly fewest
//! violations wins; ties keep the earliest trial. The full budget always runs
//! unless a termination condition cancels it.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use fairplay_core::{
    FairplayError, PlayerId, Result, Schedule, TierAnalyzer, TierPartition, TierScore,
    ViolationReport,
};

use crate::plan::{SizeRange, TrialPlan, TrialRef};
use crate::scope::SearchScope;
use crate::statistics::SearchStatistics;
use crate::termination::Termination;

/// Best partition found by a search, with its full report.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPartition {
    pub partition: TierPartition,
    pub report: ViolationReport,
    pub found_at: TrialRef,
}

impl BestPartition {
    pub fn violation_count(&self) -> usize {
        self.report.violation_count
    }

    pub fn good_matchup_count(&self) -> usize {
        self.report.good_matchup_count
    }

    pub fn top_tier(&self) -> &[PlayerId] {
        &self.report.top_tier
    }

    pub fn bottom_tier(&self) -> &[PlayerId] {
        &self.report.bottom_tier
    }

    pub fn middle_tier(&self) -> &[PlayerId] {
        &self.report.middle_tier
    }
}

/// Searches for the partition with the fewest tier violations.
///
/// Runs `trials_per_combination` trials for each size pair of `size_range`,
/// drawing every shuffle from `rng`. Seeded generators give reproducible
/// results.
///
/// # Errors
///
/// Fails on a malformed schedule, an empty size range, zero trials, sizes
/// larger than the player count, or a budget over `u32::MAX` trials.
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, Round, Schedule, ScheduleMetadata};
/// use fairplay_search::{search_best_partition, SizeRange};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![])],
/// );
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let best = search_best_partition(&schedule, SizeRange::new(1..=1, 1..=1), 20, &mut rng).unwrap();
///
/// // A single top and a single bottom player can never be partners.
/// assert_eq!(best.violation_count(), 0);
/// ```
pub fn search_best_partition<R: Rng + ?Sized>(
    schedule: &Schedule,
    size_range: SizeRange,
    trials_per_combination: u32,
    rng: &mut R,
) -> Result<BestPartition> {
    let analyzer = TierAnalyzer::new(schedule)?;
    let plan = TrialPlan::new(size_range, trials_per_combination, analyzer.universe().len())?;
    let scope = SearchScope::new(plan.unit_count());

    log_search_start(&analyzer, &plan, None, "sequential");
    let best = run_with_rng(&analyzer, &plan, rng, &scope, None)?;
    log_search_end(&SearchStatistics::from_scope(&scope), &best);
    Ok(best)
}

/// Runs every unit in order on the calling thread, drawing from `rng`.
pub(crate) fn run_with_rng<R: Rng + ?Sized>(
    analyzer: &TierAnalyzer<'_>,
    plan: &TrialPlan,
    rng: &mut R,
    scope: &SearchScope,
    termination: Option<&dyn Termination>,
) -> Result<BestPartition> {
    let players = analyzer.universe().to_vec();
    let mut order = players.clone();
    let mut best: Option<(TierScore, TierPartition, u64)> = None;

    for unit in 0..plan.unit_count() {
        if termination.is_some_and(|t| t.is_terminated(scope)) {
            break;
        }

        let (top_size, bottom_size) = plan.sizes_of(unit);
        order.copy_from_slice(&players);
        order.shuffle(rng);
        let partition = TierPartition::split(&order, top_size, bottom_size);
        let score = analyzer.score(&partition);
        scope.record_trial();

        if best
            .as_ref()
            .map_or(true, |(current, _, _)| score.improves_on(current))
        {
            scope.record_improvement();
            log_improvement(plan, unit, score);
            best = Some((score, partition, unit));
        }
    }

    finish(analyzer, plan, best.map(|(_, partition, unit)| (partition, unit)))
}

/// Builds the full report for the winning unit, or `Cancelled` if no trial ran.
pub(crate) fn finish(
    analyzer: &TierAnalyzer<'_>,
    plan: &TrialPlan,
    best: Option<(TierPartition, u64)>,
) -> Result<BestPartition> {
    let (partition, unit) = best.ok_or(FairplayError::Cancelled)?;
    let report = analyzer.analyze(&partition)?;
    Ok(BestPartition {
        partition,
        report,
        found_at: plan.locate(unit),
    })
}

pub(crate) fn log_search_start(
    analyzer: &TierAnalyzer<'_>,
    plan: &TrialPlan,
    seed: Option<u64>,
    mode: &str,
) {
    let seed = seed.map_or_else(|| "caller rng".to_string(), |s| s.to_string());
    info!(
        event = "search_start",
        players = analyzer.universe().len(),
        combinations = plan.combination_count(),
        trials_per_combination = plan.trials_per_combination(),
        total_trials = plan.unit_count(),
        seed = %seed,
        mode = mode,
    );
}

pub(crate) fn log_improvement(plan: &TrialPlan, unit: u64, score: TierScore) {
    let found_at = plan.locate(unit);
    debug!(
        event = "improvement",
        violations = score.violations,
        good_matchups = score.good_matchups,
        top_size = found_at.top_size,
        bottom_size = found_at.bottom_size,
        trial = found_at.trial,
    );
}

pub(crate) fn log_search_end(statistics: &SearchStatistics, best: &BestPartition) {
    info!(
        event = "search_end",
        duration_ms = statistics.duration.as_millis() as u64,
        trials = statistics.trials_run,
        speed = statistics.trials_per_second(),
        violations = best.violation_count(),
        good_matchups = best.good_matchup_count(),
        terminated_early = statistics.terminated_early,
    );
}
