//! Configured tier search runner.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use fairplay_config::{FairplayConfig, ThreadCount};
use fairplay_core::{FairplayError, Result, Schedule, TierAnalyzer};

use crate::parallel::{run_units, Execution};
use crate::plan::{SizeRange, TrialPlan};
use crate::scope::SearchScope;
use crate::search::{log_search_end, log_search_start, run_with_rng, BestPartition};
use crate::statistics::SearchStatistics;
use crate::termination::{
    ExternalTermination, OrTermination, Termination, TimeTermination, TrialCountTermination,
};

/// Result of a [`TierSearch`] run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: BestPartition,
    pub statistics: SearchStatistics,
    /// Seed the unit streams were derived from; `None` for caller-supplied RNGs.
    pub seed: Option<u64>,
}

/// Tier search runner built from configuration.
///
/// [`solve`](Self::solve) derives every trial from `(seed, trial index)`, so a
/// seeded run returns the same partition for any thread count. Without a seed
/// one is drawn from the thread RNG and reported in [`SearchOutcome::seed`].
///
/// # Example
///
/// ```
/// use fairplay_config::{FairplayConfig, SearchConfig, ThreadCount};
/// use fairplay_core::{Court, Round, Schedule, ScheduleMetadata};
/// use fairplay_search::TierSearch;
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![
///         Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![]),
///         Round::new(2, vec![Court::from_ids([1, 3, 2, 4])], vec![]),
///     ],
/// );
/// let config = FairplayConfig::new()
///     .with_random_seed(11)
///     .with_thread_count(ThreadCount::None)
///     .with_search(SearchConfig {
///         min_top_size: 1,
///         max_top_size: 1,
///         min_bottom_size: 1,
///         max_bottom_size: 2,
///         trials_per_combination: 10,
///     });
///
/// let outcome = TierSearch::from_config(&config).solve(&schedule).unwrap();
/// assert_eq!(outcome.seed, Some(11));
/// assert_eq!(outcome.statistics.trials_run, 20);
/// ```
#[derive(Debug, Clone)]
pub struct TierSearch {
    size_range: SizeRange,
    trials_per_combination: u32,
    seed: Option<u64>,
    thread_count: ThreadCount,
    time_limit: Option<Duration>,
    trial_limit: Option<u64>,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl TierSearch {
    /// Creates a seeded, parallel search over `size_range` without limits.
    pub fn new(size_range: SizeRange, trials_per_combination: u32) -> Self {
        Self {
            size_range,
            trials_per_combination,
            seed: Some(fairplay_config::DEFAULT_SEED),
            thread_count: ThreadCount::Auto,
            time_limit: None,
            trial_limit: None,
            terminate_flag: None,
        }
    }

    pub fn from_config(config: &FairplayConfig) -> Self {
        Self {
            size_range: SizeRange::from(&config.search),
            trials_per_combination: config.search.trials_per_combination,
            seed: config.effective_seed(),
            thread_count: config.thread_count,
            time_limit: config.time_limit(),
            trial_limit: config
                .termination
                .as_ref()
                .and_then(|t| t.trial_count_limit),
            terminate_flag: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_trial_limit(mut self, trials: u64) -> Self {
        self.trial_limit = Some(trials);
        self
    }

    /// Lets another thread cancel the search by setting `flag`.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn size_range(&self) -> SizeRange {
        self.size_range
    }

    pub fn trials_per_combination(&self) -> u32 {
        self.trials_per_combination
    }

    /// Runs the search with per-trial seeded streams.
    ///
    /// # Errors
    ///
    /// Fails on a malformed schedule or search parameters, if a thread pool
    /// cannot be built, and with `Cancelled` if termination fired before the
    /// first trial.
    pub fn solve(&self, schedule: &Schedule) -> Result<SearchOutcome> {
        let analyzer = TierAnalyzer::new(schedule)?;
        let plan = self.plan(&analyzer)?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let termination = self.termination();
        let scope = SearchScope::new(plan.unit_count());

        log_search_start(&analyzer, &plan, Some(seed), &self.mode());

        let best = match self.thread_count {
            ThreadCount::None => run_units(
                &analyzer,
                &plan,
                seed,
                &scope,
                &termination,
                Execution::Sequential,
            ),
            ThreadCount::Auto => run_units(
                &analyzer,
                &plan,
                seed,
                &scope,
                &termination,
                Execution::Parallel,
            ),
            ThreadCount::Count(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| FairplayError::InvalidSearch(e.to_string()))?;
                pool.install(|| {
                    run_units(
                        &analyzer,
                        &plan,
                        seed,
                        &scope,
                        &termination,
                        Execution::Parallel,
                    )
                })
            }
        }?;

        Ok(self.outcome(&scope, best, Some(seed)))
    }

    /// Runs the search sequentially, drawing every shuffle from `rng`.
    ///
    /// The configured seed and thread count are ignored; limits still apply.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        schedule: &Schedule,
        rng: &mut R,
    ) -> Result<SearchOutcome> {
        let analyzer = TierAnalyzer::new(schedule)?;
        let plan = self.plan(&analyzer)?;
        let termination = self.termination();
        let scope = SearchScope::new(plan.unit_count());

        log_search_start(&analyzer, &plan, None, "sequential");
        let termination: &dyn Termination = &termination;
        let best = run_with_rng(&analyzer, &plan, rng, &scope, Some(termination))?;
        Ok(self.outcome(&scope, best, None))
    }

    fn plan(&self, analyzer: &TierAnalyzer<'_>) -> Result<TrialPlan> {
        TrialPlan::new(
            self.size_range,
            self.trials_per_combination,
            analyzer.universe().len(),
        )
    }

    fn mode(&self) -> String {
        match self.thread_count {
            ThreadCount::None => "sequential".to_string(),
            ThreadCount::Auto => format!("parallel ({} threads)", rayon::current_num_threads()),
            ThreadCount::Count(threads) => format!("parallel ({threads} threads)"),
        }
    }

    fn termination(&self) -> OrTermination<Vec<Box<dyn Termination>>> {
        let mut terminations: Vec<Box<dyn Termination>> = Vec::new();
        if let Some(limit) = self.time_limit {
            terminations.push(Box::new(TimeTermination::new(limit)));
        }
        if let Some(limit) = self.trial_limit {
            terminations.push(Box::new(TrialCountTermination::new(limit)));
        }
        if let Some(flag) = &self.terminate_flag {
            terminations.push(Box::new(ExternalTermination::new(Arc::clone(flag))));
        }
        OrTermination::new(terminations)
    }

    fn outcome(&self, scope: &SearchScope, best: BestPartition, seed: Option<u64>) -> SearchOutcome {
        let statistics = SearchStatistics::from_scope(scope);
        log_search_end(&statistics, &best);
        SearchOutcome {
            best,
            statistics,
            seed,
        }
    }
}
