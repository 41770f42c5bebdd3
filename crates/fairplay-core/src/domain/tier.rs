//! Skill tiers and tier partitions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerUniverse};
use crate::error::{FairplayError, Result};

/// Skill tier of a player under a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Top => write!(f, "Top"),
            Tier::Middle => write!(f, "Middle"),
            Tier::Bottom => write!(f, "Bottom"),
        }
    }
}

/// Disjoint top and bottom tiers over a player universe.
///
/// The middle tier is everything else and is only ever computed.
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, Round, Schedule, ScheduleMetadata, Tier, TierPartition, PlayerId};
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![PlayerId::new(5)])],
/// );
/// let universe = schedule.validate().unwrap();
///
/// let partition = TierPartition::from_ids(&[1, 3], &[2, 4], &universe).unwrap();
/// assert_eq!(partition.tier_of(PlayerId::new(1)), Tier::Top);
/// assert_eq!(partition.middle(&universe), vec![PlayerId::new(5)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierPartition {
    top: BTreeSet<PlayerId>,
    bottom: BTreeSet<PlayerId>,
}

impl TierPartition {
    /// Builds a partition, rejecting unknown players and overlapping tiers.
    pub fn new(
        top: impl IntoIterator<Item = PlayerId>,
        bottom: impl IntoIterator<Item = PlayerId>,
        universe: &PlayerUniverse,
    ) -> Result<Self> {
        let top: BTreeSet<PlayerId> = top.into_iter().collect();
        let bottom: BTreeSet<PlayerId> = bottom.into_iter().collect();

        if let Some(&unknown) = top
            .iter()
            .chain(bottom.iter())
            .find(|&&p| !universe.contains(p))
        {
            return Err(FairplayError::UnknownPlayer(unknown));
        }
        if let Some(&shared) = top.intersection(&bottom).next() {
            return Err(FairplayError::OverlappingTiers(shared));
        }

        Ok(Self { top, bottom })
    }

    /// Same as `new`, taking raw numeric ids.
    pub fn from_ids(top: &[u32], bottom: &[u32], universe: &PlayerUniverse) -> Result<Self> {
        Self::new(
            top.iter().copied().map(PlayerId::new),
            bottom.iter().copied().map(PlayerId::new),
            universe,
        )
    }

    /// Splits an ordering of distinct players: the first `top_size` form the
    /// top tier and the next `bottom_size` the bottom tier.
    ///
    /// # Panics
    ///
    /// Panics if `top_size + bottom_size` exceeds `order.len()`.
    pub fn split(order: &[PlayerId], top_size: usize, bottom_size: usize) -> Self {
        let (top, rest) = order.split_at(top_size);
        Self {
            top: top.iter().copied().collect(),
            bottom: rest[..bottom_size].iter().copied().collect(),
        }
    }

    pub fn tier_of(&self, player: PlayerId) -> Tier {
        if self.top.contains(&player) {
            Tier::Top
        } else if self.bottom.contains(&player) {
            Tier::Bottom
        } else {
            Tier::Middle
        }
    }

    pub fn top(&self) -> &BTreeSet<PlayerId> {
        &self.top
    }

    pub fn bottom(&self) -> &BTreeSet<PlayerId> {
        &self.bottom
    }

    /// Players in neither tier, ascending.
    pub fn middle(&self, universe: &PlayerUniverse) -> Vec<PlayerId> {
        universe
            .iter()
            .filter(|p| !self.top.contains(p) && !self.bottom.contains(p))
            .collect()
    }
}
