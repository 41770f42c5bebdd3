//! A single tournament: schedule, pairing history, standings and the round
//! currently in play.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use fairplay_core::{
    CourtNumber, FairplayError, MatchResult, PairingHistory, PlayerId, PlayerStat, Result, Round,
    RoundNumber, Schedule,
};

use crate::standings::{DisplayStanding, Standing, Standings};

/// Serializable view of a tournament for clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSnapshot {
    pub current_round: RoundNumber,
    pub total_rounds: usize,
    pub current_round_data: Round,
    pub results: Vec<MatchResult>,
    pub standings: Vec<Standing>,
}

/// Tournament state over one immutable schedule.
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, Round, Schedule, ScheduleMetadata};
/// use fairplay_tournament::Tournament;
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![
///         Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![]),
///         Round::new(2, vec![Court::from_ids([1, 3, 2, 4])], vec![]),
///     ],
/// );
/// let mut tournament = Tournament::new(schedule).unwrap();
/// tournament.submit_round(1, &[(11, 9)]).unwrap();
/// assert_eq!(tournament.advance_round().unwrap(), 2);
/// assert!(tournament.advance_round().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Tournament {
    schedule: Arc<Schedule>,
    history: PairingHistory,
    standings: Standings,
    current_round: RoundNumber,
}

impl Tournament {
    /// Validates the schedule and starts at round 1 with no results.
    pub fn new(schedule: Schedule) -> Result<Self> {
        let schedule = Arc::new(schedule);
        let standings = Standings::new(Arc::clone(&schedule))?;
        let history = PairingHistory::build(&schedule)?;
        Ok(Self {
            schedule,
            history,
            standings,
            current_round: 1,
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Partner and opponent counts over the whole schedule.
    pub fn history(&self) -> &PairingHistory {
        &self.history
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn total_rounds(&self) -> usize {
        self.schedule.round_count()
    }

    pub fn current_round(&self) -> RoundNumber {
        self.current_round
    }

    pub fn current_round_data(&self) -> &Round {
        // Rounds are numbered 1..=total after validation.
        &self.schedule.rounds()[self.current_round as usize - 1]
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round as usize == self.total_rounds()
    }

    /// Moves to the next round and returns its number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the current round is the last one.
    pub fn advance_round(&mut self) -> Result<RoundNumber> {
        if self.is_final_round() {
            return Err(FairplayError::InvalidState(format!(
                "round {} is the last round",
                self.current_round
            )));
        }
        self.current_round += 1;
        info!(event = "round_advanced", round = self.current_round);
        Ok(self.current_round)
    }

    /// Jumps to any scheduled round.
    pub fn select_round(&mut self, round: RoundNumber) -> Result<()> {
        if self.schedule.round(round).is_none() {
            return Err(FairplayError::UnknownRound(round));
        }
        self.current_round = round;
        Ok(())
    }

    pub fn record_result(&mut self, result: MatchResult) -> Result<()> {
        self.standings.record_result(result)
    }

    pub fn submit_score(
        &mut self,
        round: RoundNumber,
        court: CourtNumber,
        team1_score: u32,
        team2_score: u32,
    ) -> Result<()> {
        self.standings
            .submit_score(round, court, team1_score, team2_score)
    }

    pub fn submit_round(&mut self, round: RoundNumber, scores: &[(u32, u32)]) -> Result<()> {
        self.standings.submit_round(round, scores)
    }

    pub fn player_stats(&self) -> BTreeMap<PlayerId, PlayerStat> {
        self.standings.player_stats()
    }

    pub fn compute_standings(&self) -> Vec<Standing> {
        self.standings.compute_standings()
    }

    pub fn compute_display_standings(&self) -> Vec<DisplayStanding> {
        self.standings.compute_display_standings()
    }

    /// Every court of every round has a result.
    pub fn is_complete(&self) -> bool {
        self.schedule
            .rounds()
            .iter()
            .all(|r| self.standings.is_round_complete(r.round))
    }

    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            current_round: self.current_round,
            total_rounds: self.total_rounds(),
            current_round_data: self.current_round_data().clone(),
            results: self.standings.results().cloned().collect(),
            standings: self.compute_standings(),
        }
    }
}

#[cfg(test)]
mod tests;
