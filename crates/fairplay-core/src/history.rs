//! Pairing history index.
//!
//! Counts how often each unordered pair of players meets as partners and as
//! opponents across a schedule. Pairs meeting more than once are a schedule
//! quality defect independent of any tiering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Court, PlayerId, Round, Schedule};
use crate::error::Result;

/// Unordered pair of distinct players, stored with the smaller id first.
///
/// # Example
///
/// ```
/// use fairplay_core::{PlayerId, PlayerPair};
///
/// let a = PlayerPair::new(PlayerId::new(9), PlayerId::new(2));
/// let b = PlayerPair::new(PlayerId::new(2), PlayerId::new(9));
/// assert_eq!(a, b);
/// assert_eq!(a.low(), PlayerId::new(2));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerPair {
    low: PlayerId,
    high: PlayerId,
}

impl PlayerPair {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> PlayerId {
        self.low
    }

    pub fn high(&self) -> PlayerId {
        self.high
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.low == player || self.high == player
    }
}

impl fmt::Display for PlayerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Meeting counts for one pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCounts {
    pub partner_count: u32,
    pub opponent_count: u32,
}

/// Schedule-wide partner/opponent counts per unordered pair.
///
/// Counts only ever grow as rounds are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingHistory {
    pairs: BTreeMap<PlayerPair, PairCounts>,
    rounds_recorded: usize,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index for a whole schedule.
    ///
    /// The schedule is validated first; a malformed schedule is refused
    /// rather than producing misleading counts.
    pub fn build(schedule: &Schedule) -> Result<Self> {
        schedule.validate()?;
        let mut history = Self::new();
        for round in schedule.rounds() {
            history.record_round(round);
        }
        Ok(history)
    }

    /// Adds one round's meetings to the index.
    pub fn record_round(&mut self, round: &Round) {
        for court in &round.courts {
            self.record_court(court);
        }
        self.rounds_recorded += 1;
    }

    fn record_court(&mut self, court: &Court) {
        for team in court.teams() {
            self.entry(team.first(), team.second()).partner_count += 1;
        }
        for a in court.team1().players() {
            for b in court.team2().players() {
                self.entry(a, b).opponent_count += 1;
            }
        }
    }

    fn entry(&mut self, a: PlayerId, b: PlayerId) -> &mut PairCounts {
        self.pairs.entry(PlayerPair::new(a, b)).or_default()
    }

    /// Counts for a pair; zero counts if the pair never met.
    pub fn get(&self, a: PlayerId, b: PlayerId) -> PairCounts {
        self.pairs
            .get(&PlayerPair::new(a, b))
            .copied()
            .unwrap_or_default()
    }

    pub fn partner_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.get(a, b).partner_count
    }

    pub fn opponent_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.get(a, b).opponent_count
    }

    pub fn rounds_recorded(&self) -> usize {
        self.rounds_recorded
    }

    /// Pairs that have met at least once, in pair order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerPair, PairCounts)> + '_ {
        self.pairs.iter().map(|(pair, counts)| (*pair, *counts))
    }

    /// Sum of all partner counts; equals rounds x courts per round.
    pub fn total_partner_meetings(&self) -> u64 {
        self.pairs.values().map(|c| u64::from(c.partner_count)).sum()
    }

    /// Sum of all opponent counts; equals rounds x courts per round x 4.
    pub fn total_opponent_meetings(&self) -> u64 {
        self.pairs.values().map(|c| u64::from(c.opponent_count)).sum()
    }

    /// Pairs partnered more than once, with their partner count.
    pub fn repeated_partners(&self) -> Vec<(PlayerPair, u32)> {
        self.iter()
            .filter(|(_, c)| c.partner_count > 1)
            .map(|(pair, c)| (pair, c.partner_count))
            .collect()
    }

    /// Pairs that faced each other more than once, with their opponent count.
    pub fn repeated_opponents(&self) -> Vec<(PlayerPair, u32)> {
        self.iter()
            .filter(|(_, c)| c.opponent_count > 1)
            .map(|(pair, c)| (pair, c.opponent_count))
            .collect()
    }

    pub fn max_partner_count(&self) -> u32 {
        self.pairs.values().map(|c| c.partner_count).max().unwrap_or(0)
    }

    pub fn max_opponent_count(&self) -> u32 {
        self.pairs.values().map(|c| c.opponent_count).max().unwrap_or(0)
    }
}
