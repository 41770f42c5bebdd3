//! Player identity and the player universe of a schedule.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque player identifier.
///
/// Serialized as a bare integer so schedule documents stay compact.
///
/// # Example
///
/// ```
/// use fairplay_core::PlayerId;
///
/// let p = PlayerId::new(7);
/// assert_eq!(p.get(), 7);
/// assert_eq!(p.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        PlayerId(id)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        PlayerId(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full set of players taking part in a schedule.
///
/// Produced by `Schedule::validate`, so holding one means every round
/// covers exactly these players.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerUniverse {
    players: BTreeSet<PlayerId>,
}

impl PlayerUniverse {
    pub(crate) fn new(players: BTreeSet<PlayerId>) -> Self {
        Self { players }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterates players in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().copied()
    }

    /// Players in ascending id order.
    pub fn to_vec(&self) -> Vec<PlayerId> {
        self.iter().collect()
    }
}
