//! Schedule, round, court and team types, plus structural validation.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerUniverse};
use super::{CourtNumber, RoundNumber};
use crate::error::{FairplayError, Result};

/// Two partners on one side of a court.
///
/// Membership is unordered; the stored order is the schedule order and is
/// kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    players: [PlayerId; 2],
}

impl Team {
    pub const fn new(first: PlayerId, second: PlayerId) -> Self {
        Self {
            players: [first, second],
        }
    }

    pub fn players(&self) -> [PlayerId; 2] {
        self.players
    }

    pub fn first(&self) -> PlayerId {
        self.players[0]
    }

    pub fn second(&self) -> PlayerId {
        self.players[1]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    /// Returns the other member of the team, if `player` is on it.
    pub fn partner_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.players {
            [a, b] if a == player => Some(b),
            [a, b] if b == player => Some(a),
            _ => None,
        }
    }

    /// Compares membership regardless of order.
    pub fn same_members(&self, other: &Team) -> bool {
        self.contains(other.first()) && self.contains(other.second())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.players[0], self.players[1])
    }
}

/// One doubles match: `[p1, p2, p3, p4]` where `(p1, p2)` face `(p3, p4)`.
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, PlayerId};
///
/// let court = Court::from_ids([1, 2, 3, 4]);
/// assert!(court.team1().contains(PlayerId::new(2)));
/// assert!(court.team2().contains(PlayerId::new(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Court {
    players: [PlayerId; 4],
}

impl Court {
    pub const fn new(players: [PlayerId; 4]) -> Self {
        Self { players }
    }

    pub fn from_ids(ids: [u32; 4]) -> Self {
        Self::new(ids.map(PlayerId::new))
    }

    pub fn players(&self) -> &[PlayerId; 4] {
        &self.players
    }

    pub fn team1(&self) -> Team {
        Team::new(self.players[0], self.players[1])
    }

    pub fn team2(&self) -> Team {
        Team::new(self.players[2], self.players[3])
    }

    pub fn teams(&self) -> [Team; 2] {
        [self.team1(), self.team2()]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}

/// A single round: ordered courts plus the players sitting out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based round number.
    pub round: RoundNumber,
    /// Courts in play order; position + 1 is the court number.
    pub courts: Vec<Court>,
    /// Players on a bye this round.
    #[serde(default)]
    pub bye_players: Vec<PlayerId>,
}

impl Round {
    pub fn new(round: RoundNumber, courts: Vec<Court>, bye_players: Vec<PlayerId>) -> Self {
        Self {
            round,
            courts,
            bye_players,
        }
    }

    /// Looks up a court by its 1-based number.
    pub fn court(&self, court: CourtNumber) -> Option<&Court> {
        let index = usize::try_from(court).ok()?.checked_sub(1)?;
        self.courts.get(index)
    }

    /// Courts paired with their 1-based numbers.
    pub fn numbered_courts(&self) -> impl Iterator<Item = (CourtNumber, &Court)> {
        (1..).zip(self.courts.iter())
    }

    pub fn is_bye(&self, player: PlayerId) -> bool {
        self.bye_players.contains(&player)
    }

    /// Every player mentioned in the round, courts first then byes.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.courts
            .iter()
            .flat_map(|c| c.players().iter().copied())
            .chain(self.bye_players.iter().copied())
    }
}

/// Tournament sizing and labelling that travels with a schedule document.
///
/// Zero sizing fields mean "not declared" and are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleMetadata {
    pub tournament_type: Option<String>,
    pub players: usize,
    pub rounds: usize,
    pub courts_per_round: usize,
    pub byes_per_round: usize,
    /// Players that never sit out.
    pub iron_players: Vec<PlayerId>,
    pub description: Option<String>,
    pub date_generated: Option<String>,
}

/// An immutable doubles schedule.
///
/// Court order inside each round is significant: a court's position is the
/// key that links a submitted score to its match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub metadata: ScheduleMetadata,
    #[serde(rename = "schedule")]
    rounds: Vec<Round>,
}

impl Schedule {
    pub fn new(metadata: ScheduleMetadata, rounds: Vec<Round>) -> Self {
        Self { metadata, rounds }
    }

    /// Parses a schedule document from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a schedule document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Looks up a round by its 1-based number.
    pub fn round(&self, round: RoundNumber) -> Option<&Round> {
        let index = usize::try_from(round).ok()?.checked_sub(1)?;
        self.rounds.get(index)
    }

    pub fn court(&self, round: RoundNumber, court: CourtNumber) -> Option<&Court> {
        self.round(round)?.court(court)
    }

    /// Every court in round-then-court order.
    pub fn courts(&self) -> impl Iterator<Item = (RoundNumber, CourtNumber, &Court)> {
        self.rounds.iter().flat_map(|round| {
            round
                .numbered_courts()
                .map(move |(number, court)| (round.round, number, court))
        })
    }

    pub fn iron_players(&self) -> &[PlayerId] {
        &self.metadata.iron_players
    }

    pub fn is_iron(&self, player: PlayerId) -> bool {
        self.metadata.iron_players.contains(&player)
    }

    /// Checks the structural invariants and returns the player universe.
    ///
    /// The universe is every id mentioned anywhere in the schedule; each round
    /// must then place each of those players exactly once, on a court or on a
    /// bye. The first defect found is reported with its round, court and
    /// player.
    pub fn validate(&self) -> Result<PlayerUniverse> {
        if self.rounds.is_empty() {
            return Err(FairplayError::EmptySchedule);
        }

        let universe: BTreeSet<PlayerId> =
            self.rounds.iter().flat_map(|r| r.players()).collect();

        for (position, round) in (1..).zip(self.rounds.iter()) {
            if round.round as usize != position {
                return Err(FairplayError::RoundOutOfSequence {
                    position,
                    found: round.round,
                });
            }
            self.validate_round(round, &universe)?;
        }

        for &iron in &self.metadata.iron_players {
            if !universe.contains(&iron) {
                return Err(FairplayError::UnknownPlayer(iron));
            }
        }

        self.validate_sizing(universe.len())?;

        Ok(PlayerUniverse::new(universe))
    }

    fn validate_round(&self, round: &Round, universe: &BTreeSet<PlayerId>) -> Result<()> {
        let mut seen = BTreeSet::new();

        for (number, court) in round.numbered_courts() {
            let mut on_court = BTreeSet::new();
            for &player in court.players() {
                if !on_court.insert(player) {
                    return Err(FairplayError::DuplicateOnCourt {
                        round: round.round,
                        court: number,
                        player,
                    });
                }
                if !seen.insert(player) {
                    return Err(FairplayError::DuplicateInRound {
                        round: round.round,
                        player,
                    });
                }
            }
        }

        for &player in &round.bye_players {
            if !seen.insert(player) {
                return Err(FairplayError::DuplicateInRound {
                    round: round.round,
                    player,
                });
            }
            if self.is_iron(player) {
                return Err(FairplayError::IronPlayerOnBye {
                    round: round.round,
                    player,
                });
            }
        }

        if let Some(&player) = universe.difference(&seen).next() {
            return Err(FairplayError::MissingFromRound {
                round: round.round,
                player,
            });
        }

        Ok(())
    }

    fn validate_sizing(&self, player_count: usize) -> Result<()> {
        let meta = &self.metadata;
        check_declared("players", meta.players, player_count)?;
        check_declared("rounds", meta.rounds, self.rounds.len())?;
        for round in &self.rounds {
            check_declared("courts per round", meta.courts_per_round, round.courts.len())?;
            check_declared("byes per round", meta.byes_per_round, round.bye_players.len())?;
        }
        Ok(())
    }
}

fn check_declared(field: &'static str, declared: usize, actual: usize) -> Result<()> {
    if declared != 0 && declared != actual {
        return Err(FairplayError::SizingMismatch {
            field,
            declared,
            actual,
        });
    }
    Ok(())
}
