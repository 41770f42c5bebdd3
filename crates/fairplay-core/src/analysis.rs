//! Tier violation scoring.
//!
//! Given a schedule and a top/bottom tier split, every court is checked for:
//! - **violations**: a team whose two partners are both top tier or both
//!   bottom tier (mixed and middle-tier teams never violate)
//! - **good matchups**: one team has a top-tier member while the opposing
//!   team has a bottom-tier member (either direction), counted once per court
//!
//! Courts made mostly of middle-tier players can never register a good
//! matchup; the rule is applied literally without normalizing for coverage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Court, CourtNumber, PlayerId, PlayerUniverse, RoundNumber, Schedule, Team, Tier,
    TierPartition,
};
use crate::error::{FairplayError, Result};

/// Two same-tier players placed as partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierViolation {
    pub round: RoundNumber,
    pub court: CourtNumber,
    pub tier: Tier,
    pub team: Team,
}

impl fmt::Display for TierViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}, Court {}: {} tier partners {}",
            self.round, self.court, self.tier, self.team
        )
    }
}

/// A court where top-tier players face bottom-tier players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodMatchup {
    pub round: RoundNumber,
    pub court: CourtNumber,
}

impl fmt::Display for GoodMatchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}, Court {}: Good matchup (tier separation)",
            self.round, self.court
        )
    }
}

/// Counts-only outcome of scoring a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScore {
    pub violations: u32,
    pub good_matchups: u32,
}

impl TierScore {
    /// Strictly fewer violations. Good matchups never break ties.
    pub fn improves_on(&self, other: &TierScore) -> bool {
        self.violations < other.violations
    }
}

/// Full scoring report with per-court detail, in round-then-court order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationReport {
    pub violation_count: usize,
    pub violations: Vec<TierViolation>,
    pub good_matchup_count: usize,
    pub good_matchups: Vec<GoodMatchup>,
    pub top_tier: Vec<PlayerId>,
    pub bottom_tier: Vec<PlayerId>,
    pub middle_tier: Vec<PlayerId>,
}

impl ViolationReport {
    pub fn violation_details(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn good_matchup_details(&self) -> Vec<String> {
        self.good_matchups.iter().map(ToString::to_string).collect()
    }

    pub fn score(&self) -> TierScore {
        TierScore {
            violations: self.violation_count as u32,
            good_matchups: self.good_matchup_count as u32,
        }
    }
}

enum Finding {
    Violation(TierViolation),
    GoodMatchup(GoodMatchup),
}

/// Scores tier partitions against one validated schedule.
///
/// Validation happens once in `new`, so the analyzer can be reused cheaply
/// across many partitions (as the partition search does).
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, PlayerId, Round, Schedule, ScheduleMetadata, TierAnalyzer, TierPartition};
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![])],
/// );
/// let analyzer = TierAnalyzer::new(&schedule).unwrap();
///
/// let partition = TierPartition::from_ids(&[1, 2], &[], analyzer.universe()).unwrap();
/// let report = analyzer.analyze(&partition).unwrap();
/// assert_eq!(report.violation_count, 1);
/// assert_eq!(report.violation_details()[0], "Round 1, Court 1: Top tier partners (1, 2)");
/// ```
#[derive(Debug, Clone)]
pub struct TierAnalyzer<'a> {
    schedule: &'a Schedule,
    universe: PlayerUniverse,
}

impl<'a> TierAnalyzer<'a> {
    pub fn new(schedule: &'a Schedule) -> Result<Self> {
        let universe = schedule.validate()?;
        Ok(Self { schedule, universe })
    }

    pub fn schedule(&self) -> &'a Schedule {
        self.schedule
    }

    pub fn universe(&self) -> &PlayerUniverse {
        &self.universe
    }

    /// Produces the full report for a partition.
    ///
    /// Rejects partitions naming players outside this schedule.
    pub fn analyze(&self, partition: &TierPartition) -> Result<ViolationReport> {
        if let Some(&unknown) = partition
            .top()
            .iter()
            .chain(partition.bottom().iter())
            .find(|&&p| !self.universe.contains(p))
        {
            return Err(FairplayError::UnknownPlayer(unknown));
        }

        let mut violations = Vec::new();
        let mut good_matchups = Vec::new();
        self.visit(partition, |finding| match finding {
            Finding::Violation(v) => violations.push(v),
            Finding::GoodMatchup(g) => good_matchups.push(g),
        });

        Ok(ViolationReport {
            violation_count: violations.len(),
            violations,
            good_matchup_count: good_matchups.len(),
            good_matchups,
            top_tier: partition.top().iter().copied().collect(),
            bottom_tier: partition.bottom().iter().copied().collect(),
            middle_tier: partition.middle(&self.universe),
        })
    }

    /// Counts violations and good matchups without collecting detail.
    pub fn score(&self, partition: &TierPartition) -> TierScore {
        let mut score = TierScore::default();
        self.visit(partition, |finding| match finding {
            Finding::Violation(_) => score.violations += 1,
            Finding::GoodMatchup(_) => score.good_matchups += 1,
        });
        score
    }

    fn visit(&self, partition: &TierPartition, mut on_finding: impl FnMut(Finding)) {
        for (round, court_number, court) in self.schedule.courts() {
            check_court(partition, round, court_number, court, &mut on_finding);
        }
    }
}

fn check_court(
    partition: &TierPartition,
    round: RoundNumber,
    court_number: CourtNumber,
    court: &Court,
    on_finding: &mut impl FnMut(Finding),
) {
    let mut has_top = [false; 2];
    let mut has_bottom = [false; 2];

    for (side, team) in court.teams().into_iter().enumerate() {
        let tiers = team.players().map(|p| partition.tier_of(p));
        let tops = tiers.iter().filter(|&&t| t == Tier::Top).count();
        let bottoms = tiers.iter().filter(|&&t| t == Tier::Bottom).count();

        for (count, tier) in [(tops, Tier::Top), (bottoms, Tier::Bottom)] {
            if count == 2 {
                on_finding(Finding::Violation(TierViolation {
                    round,
                    court: court_number,
                    tier,
                    team,
                }));
            }
        }

        has_top[side] = tops > 0;
        has_bottom[side] = bottoms > 0;
    }

    if (has_top[0] && has_bottom[1]) || (has_bottom[0] && has_top[1]) {
        on_finding(Finding::GoodMatchup(GoodMatchup {
            round,
            court: court_number,
        }));
    }
}

/// Validates the schedule and partition, then scores the partition.
pub fn analyze_tier(
    schedule: &Schedule,
    top: &[PlayerId],
    bottom: &[PlayerId],
) -> Result<ViolationReport> {
    let analyzer = TierAnalyzer::new(schedule)?;
    let partition = TierPartition::new(
        top.iter().copied(),
        bottom.iter().copied(),
        analyzer.universe(),
    )?;
    analyzer.analyze(&partition)
}
