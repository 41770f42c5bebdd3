//! Size ranges and the enumeration of search trials.
//!
//! A search runs `trials_per_combination` trials for every `(top, bottom)` size
//! pair. Each trial is a *unit* with a stable index: combinations are
//! enumerated top size outer, bottom size inner (both ascending), and trials
//! are consecutive within a combination. Both the sequential and parallel
//! searches visit units in this order, so "first found" means lowest index.

use std::ops::RangeInclusive;

use fairplay_config::SearchConfig;
use fairplay_core::{FairplayError, Result};

/// Inclusive ranges of top and bottom tier sizes to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub min_top: usize,
    pub max_top: usize,
    pub min_bottom: usize,
    pub max_bottom: usize,
}

impl SizeRange {
    /// # Example
    ///
    /// ```
    /// use fairplay_search::SizeRange;
    ///
    /// let range = SizeRange::new(5..=8, 5..=8);
    /// assert_eq!(range.combination_count(), 16);
    /// assert_eq!(range.combinations().next(), Some((5, 5)));
    /// ```
    pub fn new(top: RangeInclusive<usize>, bottom: RangeInclusive<usize>) -> Self {
        Self {
            min_top: *top.start(),
            max_top: *top.end(),
            min_bottom: *bottom.start(),
            max_bottom: *bottom.end(),
        }
    }

    /// All `(top_size, bottom_size)` pairs in search order.
    pub fn combinations(&self) -> impl Iterator<Item = (usize, usize)> {
        let bottoms = self.min_bottom..=self.max_bottom;
        (self.min_top..=self.max_top).flat_map(move |top| bottoms.clone().map(move |b| (top, b)))
    }

    /// Number of size pairs, saturating at `usize::MAX`.
    pub fn combination_count(&self) -> usize {
        span(self.min_top, self.max_top).saturating_mul(span(self.min_bottom, self.max_bottom))
    }

    /// Whether at least one combination exists.
    pub fn is_empty(&self) -> bool {
        self.min_top > self.max_top || self.min_bottom > self.max_bottom
    }
}

// Length of `min..=max`, saturating for full-width ranges.
fn span(min: usize, max: usize) -> usize {
    if min > max {
        0
    } else {
        (max - min).saturating_add(1)
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        SizeRange::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SizeRange {
    fn from(config: &SearchConfig) -> Self {
        Self {
            min_top: config.min_top_size,
            max_top: config.max_top_size,
            min_bottom: config.min_bottom_size,
            max_bottom: config.max_bottom_size,
        }
    }
}

/// Where a partition was drawn: its sizes and the trial index (0-based)
/// within that size combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRef {
    pub top_size: usize,
    pub bottom_size: usize,
    pub trial: u32,
}

/// Validated unit enumeration for one search.
#[derive(Debug, Clone)]
pub(crate) struct TrialPlan {
    range: SizeRange,
    bottom_sizes: u64,
    combination_count: u64,
    trials_per_combination: u32,
}

impl TrialPlan {
    pub(crate) fn new(
        range: SizeRange,
        trials_per_combination: u32,
        player_count: usize,
    ) -> Result<Self> {
        if range.min_top > range.max_top {
            return Err(FairplayError::InvalidSearch(format!(
                "top size range {}..={} is empty",
                range.min_top, range.max_top
            )));
        }
        if range.min_bottom > range.max_bottom {
            return Err(FairplayError::InvalidSearch(format!(
                "bottom size range {}..={} is empty",
                range.min_bottom, range.max_bottom
            )));
        }
        if trials_per_combination == 0 {
            return Err(FairplayError::InvalidSearch(
                "trials_per_combination must be at least 1".to_string(),
            ));
        }
        let fits = range
            .max_top
            .checked_add(range.max_bottom)
            .is_some_and(|largest| largest <= player_count);
        if !fits {
            return Err(FairplayError::InvalidSearch(format!(
                "top {} plus bottom {} exceeds {} players",
                range.max_top, range.max_bottom, player_count
            )));
        }

        // Both maxima are bounded by the player count here, so the spans fit.
        let top_sizes = (range.max_top - range.min_top) as u64 + 1;
        let bottom_sizes = (range.max_bottom - range.min_bottom) as u64 + 1;
        let combination_count = top_sizes.saturating_mul(bottom_sizes);

        // Unit indices share a u64 with the violation count.
        let units = combination_count.saturating_mul(u64::from(trials_per_combination));
        if units > u64::from(u32::MAX) {
            return Err(FairplayError::InvalidSearch(format!(
                "{} trials exceed the supported budget of {}",
                units,
                u32::MAX
            )));
        }

        Ok(Self {
            range,
            bottom_sizes,
            combination_count,
            trials_per_combination,
        })
    }

    pub(crate) fn unit_count(&self) -> u64 {
        self.combination_count * u64::from(self.trials_per_combination)
    }

    pub(crate) fn combination_count(&self) -> u64 {
        self.combination_count
    }

    pub(crate) fn trials_per_combination(&self) -> u32 {
        self.trials_per_combination
    }

    /// `(top_size, bottom_size)` for a unit.
    pub(crate) fn sizes_of(&self, unit: u64) -> (usize, usize) {
        let index = unit / u64::from(self.trials_per_combination);
        let top = self.range.min_top + (index / self.bottom_sizes) as usize;
        let bottom = self.range.min_bottom + (index % self.bottom_sizes) as usize;
        (top, bottom)
    }

    pub(crate) fn locate(&self, unit: u64) -> TrialRef {
        let (top_size, bottom_size) = self.sizes_of(unit);
        TrialRef {
            top_size,
            bottom_size,
            trial: (unit % u64::from(self.trials_per_combination)) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combination_order_is_top_outer() {
        let range = SizeRange::new(1..=2, 3..=4);
        let combos: Vec<_> = range.combinations().collect();
        assert_eq!(combos, vec![(1, 3), (1, 4), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_locate_units() {
        let plan = TrialPlan::new(SizeRange::new(1..=2, 1..=1), 3, 10).unwrap();
        assert_eq!(plan.unit_count(), 6);
        assert_eq!(
            plan.locate(4),
            TrialRef {
                top_size: 2,
                bottom_size: 1,
                trial: 1,
            }
        );
        assert_eq!(plan.sizes_of(2), (1, 1));
    }

    #[test]
    fn test_rejects_invalid_plans() {
        let range = SizeRange::new(5..=8, 5..=8);
        assert!(TrialPlan::new(range, 0, 22).is_err());
        assert!(TrialPlan::new(range, 10, 15).is_err());
        assert!(TrialPlan::new(range, 10, 16).is_ok());
        assert!(TrialPlan::new(SizeRange::new(3..=2, 1..=1), 1, 22).is_err());
        assert!(TrialPlan::new(SizeRange::new(1..=1, 3..=2), 1, 22).is_err());
    }

    #[test]
    fn test_rejects_oversized_budget() {
        let range = SizeRange::new(0..=1, 0..=1);
        let err = TrialPlan::new(range, u32::MAX, 4).unwrap_err();
        assert!(matches!(err, FairplayError::InvalidSearch(_)));
    }

    #[test]
    fn test_full_width_ranges_are_rejected_not_overflowed() {
        let err = TrialPlan::new(SizeRange::new(0..=usize::MAX, 1..=1), 1, 5).unwrap_err();
        assert!(matches!(err, FairplayError::InvalidSearch(_)));

        let err =
            TrialPlan::new(SizeRange::new(usize::MAX..=usize::MAX, usize::MAX..=usize::MAX), 1, 5)
                .unwrap_err();
        assert!(matches!(err, FairplayError::InvalidSearch(_)));

        assert_eq!(
            SizeRange::new(0..=usize::MAX, 0..=usize::MAX).combination_count(),
            usize::MAX
        );
        assert_eq!(SizeRange::new(3..=2, 0..=usize::MAX).combination_count(), 0);
    }

    #[test]
    fn test_units_cover_every_combination_in_order() {
        let range = SizeRange::new(2..=4, 1..=3);
        let plan = TrialPlan::new(range, 2, 10).unwrap();
        assert_eq!(plan.combination_count(), 9);

        let sizes: Vec<_> = (0..plan.unit_count())
            .step_by(2)
            .map(|unit| plan.sizes_of(unit))
            .collect();
        let expected: Vec<_> = range.combinations().collect();
        assert_eq!(sizes, expected);
    }

    #[test]
    fn test_default_matches_config_defaults() {
        assert_eq!(SizeRange::default(), SizeRange::new(5..=8, 5..=8));
        assert!(!SizeRange::default().is_empty());
        assert!(SizeRange::new(2..=1, 0..=0).is_empty());
    }
}
