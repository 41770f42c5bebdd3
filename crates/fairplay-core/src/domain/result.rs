//! Submitted match results and per-player statistics derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::schedule::Team;
use super::{CourtNumber, RoundNumber};
use crate::error::{FairplayError, Result};

/// Identifies one scheduled match. Orders by round, then court.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MatchKey {
    pub round: RoundNumber,
    pub court: CourtNumber,
}

impl MatchKey {
    pub const fn new(round: RoundNumber, court: CourtNumber) -> Self {
        Self { round, court }
    }
}

/// Score submission for one court.
///
/// Scores are optional on the wire so that an incomplete submission can be
/// rejected with a precise error instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub round: RoundNumber,
    pub court: CourtNumber,
    pub team1: Team,
    pub team2: Team,
    #[serde(default)]
    pub team1_score: Option<u32>,
    #[serde(default)]
    pub team2_score: Option<u32>,
}

impl MatchResult {
    pub fn new(
        round: RoundNumber,
        court: CourtNumber,
        team1: Team,
        team2: Team,
        team1_score: u32,
        team2_score: u32,
    ) -> Self {
        Self {
            round,
            court,
            team1,
            team2,
            team1_score: Some(team1_score),
            team2_score: Some(team2_score),
        }
    }

    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.round, self.court)
    }

    /// Returns `(team1_score, team2_score)` if both are present and differ.
    pub fn decided_scores(&self) -> Result<(u32, u32)> {
        let (Some(s1), Some(s2)) = (self.team1_score, self.team2_score) else {
            return Err(FairplayError::MissingScore {
                round: self.round,
                court: self.court,
            });
        };
        if s1 == s2 {
            return Err(FairplayError::TiedScore {
                round: self.round,
                court: self.court,
                score: s1,
            });
        }
        Ok((s1, s2))
    }

    /// Parses a list of results from JSON.
    pub fn list_from_json_str(s: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Statistics for one player, derived by replaying recorded results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub partners: BTreeSet<PlayerId>,
    pub opponents: BTreeSet<PlayerId>,
    pub byes: u32,
}

impl PlayerStat {
    /// Point differential (`points_for - points_against`).
    pub fn diff(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    /// Applies one match from this player's perspective.
    pub fn record_match(
        &mut self,
        points_for: u32,
        points_against: u32,
        partner: PlayerId,
        opponents: Team,
    ) {
        self.matches += 1;
        if points_for > points_against {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.points_for += u64::from(points_for);
        self.points_against += u64::from(points_against);
        self.partners.insert(partner);
        self.opponents.extend(opponents.players());
    }
}
