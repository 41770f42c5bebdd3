//! Search entry point that reads `fairplay.toml` from the working directory.

use fairplay_config::FairplayConfig;
use fairplay_core::{Result, Schedule};
use fairplay_search::{SearchOutcome, TierSearch};

/// Config file picked up by [`run_search`].
pub const CONFIG_FILE: &str = "fairplay.toml";

/// Runs the tier search on a schedule.
///
/// Settings come from `fairplay.toml` when present and valid, defaults
/// otherwise. With the `console` feature the colored console is installed
/// first.
pub fn run_search(schedule: &Schedule) -> Result<SearchOutcome> {
    #[cfg(feature = "console")]
    fairplay_console::init();

    let config = FairplayConfig::load(CONFIG_FILE).unwrap_or_default();
    TierSearch::from_config(&config).solve(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairplay_test::reference_schedule;

    #[test]
    fn test_run_search_with_defaults() {
        let outcome = run_search(&reference_schedule()).unwrap();

        assert_eq!(outcome.seed, Some(fairplay_config::DEFAULT_SEED));
        assert_eq!(outcome.statistics.trials_run, 1600);
        let best = &outcome.best;
        assert_eq!(
            best.top_tier().len() + best.bottom_tier().len() + best.middle_tier().len(),
            22
        );
    }
}
