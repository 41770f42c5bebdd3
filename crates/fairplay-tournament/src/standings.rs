//! Standings aggregation.
//!
//! Recorded results are the only state: a result per `(round, court)`, kept in
//! a `BTreeMap`. Player statistics are rebuilt by replaying that map on every
//! read, so resubmitting a court replaces its result and can never count it
//! twice.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use fairplay_core::{
    CourtNumber, FairplayError, MatchKey, MatchResult, PlayerId, PlayerStat, PlayerUniverse,
    Result, RoundNumber, Schedule,
};

/// Multiplier applied to iron players' counters on display leaderboards.
pub const IRON_DISPLAY_FACTOR: f64 = 0.9;

/// One leaderboard row. `rank` is 1-based and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub rank: usize,
    pub player: PlayerId,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub diff: i64,
    pub byes: u32,
    pub iron: bool,
}

/// Leaderboard row with iron display scaling applied.
///
/// Computed at read time only; canonical counters stay in [`Standing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStanding {
    pub rank: usize,
    pub player: PlayerId,
    pub matches: u32,
    pub wins: f64,
    pub losses: f64,
    pub points_for: f64,
    pub points_against: f64,
    pub diff: f64,
    pub iron: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedResult {
    result: MatchResult,
    team1_score: u32,
    team2_score: u32,
}

/// Results recorded against one schedule.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fairplay_core::{Court, PlayerId, Round, Schedule, ScheduleMetadata};
/// use fairplay_tournament::Standings;
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![])],
/// );
/// let mut standings = Standings::new(Arc::new(schedule)).unwrap();
/// standings.submit_score(1, 1, 11, 7).unwrap();
///
/// let table = standings.compute_standings();
/// assert_eq!(table[0].player, PlayerId::new(1));
/// assert_eq!(table[0].diff, 4);
/// assert_eq!(table[3].player, PlayerId::new(4));
/// ```
#[derive(Debug, Clone)]
pub struct Standings {
    schedule: Arc<Schedule>,
    universe: PlayerUniverse,
    results: BTreeMap<MatchKey, RecordedResult>,
}

impl Standings {
    /// Validates the schedule and starts with no results.
    pub fn new(schedule: Arc<Schedule>) -> Result<Self> {
        let universe = schedule.validate()?;
        Ok(Self {
            schedule,
            universe,
            results: BTreeMap::new(),
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn universe(&self) -> &PlayerUniverse {
        &self.universe
    }

    /// Checks a result against the schedule without recording it.
    ///
    /// Returns the decided `(team1, team2)` scores.
    pub fn check_result(&self, result: &MatchResult) -> Result<(u32, u32)> {
        let round = self
            .schedule
            .round(result.round)
            .ok_or(FairplayError::UnknownRound(result.round))?;
        let court = round.court(result.court).ok_or(FairplayError::UnknownCourt {
            round: result.round,
            court: result.court,
        })?;
        let scores = result.decided_scores()?;
        if !result.team1.same_members(&court.team1()) || !result.team2.same_members(&court.team2())
        {
            return Err(FairplayError::TeamMismatch {
                round: result.round,
                court: result.court,
            });
        }
        Ok(scores)
    }

    /// Records a result, replacing any earlier result for the same court.
    ///
    /// A rejected result leaves the standings untouched.
    pub fn record_result(&mut self, result: MatchResult) -> Result<()> {
        let (team1_score, team2_score) = self.check_result(&result).inspect_err(|err| {
            debug!(
                event = "result_rejected",
                round = result.round,
                court = result.court,
                error = %err,
            );
        })?;

        let key = result.key();
        let replaced = self
            .results
            .insert(
                key,
                RecordedResult {
                    result,
                    team1_score,
                    team2_score,
                },
            )
            .is_some();

        info!(
            event = "result_recorded",
            round = key.round,
            court = key.court,
            team1_score = team1_score,
            team2_score = team2_score,
            replaced = replaced,
        );
        Ok(())
    }

    /// Records a score for a scheduled court, taking the teams from the schedule.
    pub fn submit_score(
        &mut self,
        round: RoundNumber,
        court: CourtNumber,
        team1_score: u32,
        team2_score: u32,
    ) -> Result<()> {
        let result = self.scheduled_result(round, court, team1_score, team2_score)?;
        self.record_result(result)
    }

    /// Records scores for every court of a round, in court order.
    ///
    /// Every court must be given a score and every score must be valid;
    /// otherwise nothing is recorded.
    pub fn submit_round(&mut self, round: RoundNumber, scores: &[(u32, u32)]) -> Result<()> {
        let courts = self
            .schedule
            .round(round)
            .ok_or(FairplayError::UnknownRound(round))?
            .courts
            .len();
        if scores.len() > courts {
            return Err(FairplayError::UnknownCourt {
                round,
                court: (courts + 1) as CourtNumber,
            });
        }
        if scores.len() < courts {
            return Err(FairplayError::MissingScore {
                round,
                court: (scores.len() + 1) as CourtNumber,
            });
        }

        let results = scores
            .iter()
            .zip(1..)
            .map(|(&(s1, s2), court)| {
                let result = self.scheduled_result(round, court, s1, s2)?;
                self.check_result(&result)?;
                Ok(result)
            })
            .collect::<Result<Vec<_>>>()?;

        for result in results {
            self.record_result(result)?;
        }
        Ok(())
    }

    fn scheduled_result(
        &self,
        round: RoundNumber,
        court: CourtNumber,
        team1_score: u32,
        team2_score: u32,
    ) -> Result<MatchResult> {
        let scheduled = self
            .schedule
            .round(round)
            .ok_or(FairplayError::UnknownRound(round))?
            .court(court)
            .ok_or(FairplayError::UnknownCourt { round, court })?;
        Ok(MatchResult::new(
            round,
            court,
            scheduled.team1(),
            scheduled.team2(),
            team1_score,
            team2_score,
        ))
    }

    /// Recorded results in round-then-court order.
    pub fn results(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.values().map(|r| &r.result)
    }

    pub fn result(&self, round: RoundNumber, court: CourtNumber) -> Option<&MatchResult> {
        self.results
            .get(&MatchKey::new(round, court))
            .map(|r| &r.result)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Whether any result has been recorded for the round.
    pub fn is_round_started(&self, round: RoundNumber) -> bool {
        self.round_results(round).next().is_some()
    }

    /// Whether every court of the round has a result.
    pub fn is_round_complete(&self, round: RoundNumber) -> bool {
        self.schedule
            .round(round)
            .is_some_and(|r| self.round_results(round).count() == r.courts.len())
    }

    fn round_results(&self, round: RoundNumber) -> impl Iterator<Item = &RecordedResult> {
        self.results
            .range(MatchKey::new(round, CourtNumber::MIN)..=MatchKey::new(round, CourtNumber::MAX))
            .map(|(_, r)| r)
    }

    /// Replays every recorded result into per-player statistics.
    ///
    /// Every player of the schedule is present. A bye counts once the round it
    /// falls in has at least one result.
    pub fn player_stats(&self) -> BTreeMap<PlayerId, PlayerStat> {
        let mut stats: BTreeMap<PlayerId, PlayerStat> = self
            .universe
            .iter()
            .map(|p| (p, PlayerStat::default()))
            .collect();

        for recorded in self.results.values() {
            let (team1, team2) = (recorded.result.team1, recorded.result.team2);
            let sides = [
                (team1, team2, recorded.team1_score, recorded.team2_score),
                (team2, team1, recorded.team2_score, recorded.team1_score),
            ];
            for (team, opponents, points_for, points_against) in sides {
                for player in team.players() {
                    if let Some(partner) = team.partner_of(player) {
                        stats.entry(player).or_default().record_match(
                            points_for,
                            points_against,
                            partner,
                            opponents,
                        );
                    }
                }
            }
        }

        for round in self.schedule.rounds() {
            if !self.is_round_started(round.round) {
                continue;
            }
            for &player in &round.bye_players {
                stats.entry(player).or_default().byes += 1;
            }
        }

        stats
    }

    pub fn player_stat(&self, player: PlayerId) -> Option<PlayerStat> {
        if !self.universe.contains(player) {
            return None;
        }
        self.player_stats().remove(&player)
    }

    /// Ranked leaderboard: wins descending, point differential descending,
    /// then player id ascending.
    pub fn compute_standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .player_stats()
            .into_iter()
            .map(|(player, stat)| Standing {
                rank: 0,
                player,
                matches: stat.matches,
                wins: stat.wins,
                losses: stat.losses,
                points_for: stat.points_for,
                points_against: stat.points_against,
                diff: stat.diff(),
                byes: stat.byes,
                iron: self.schedule.is_iron(player),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.diff.cmp(&a.diff))
                .then_with(|| a.player.cmp(&b.player))
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = index + 1;
        }
        rows
    }

    /// Leaderboard with iron players' wins, losses and points scaled by
    /// [`IRON_DISPLAY_FACTOR`], ranked on the scaled values.
    pub fn compute_display_standings(&self) -> Vec<DisplayStanding> {
        let mut rows: Vec<DisplayStanding> = self
            .player_stats()
            .into_iter()
            .map(|(player, stat)| {
                let iron = self.schedule.is_iron(player);
                let factor = if iron { IRON_DISPLAY_FACTOR } else { 1.0 };
                let points_for = stat.points_for as f64 * factor;
                let points_against = stat.points_against as f64 * factor;
                DisplayStanding {
                    rank: 0,
                    player,
                    matches: stat.matches,
                    wins: f64::from(stat.wins) * factor,
                    losses: f64::from(stat.losses) * factor,
                    points_for,
                    points_against,
                    diff: points_for - points_against,
                    iron,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            descending(a.wins, b.wins)
                .then_with(|| descending(a.diff, b.diff))
                .then_with(|| a.player.cmp(&b.player))
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = index + 1;
        }
        rows
    }

    /// Drops every recorded result.
    pub fn clear(&mut self) {
        self.results.clear();
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests;
