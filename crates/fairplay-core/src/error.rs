//! Error types for Fairplay

use thiserror::Error;

use crate::domain::{CourtNumber, PlayerId, RoundNumber};

/// Main error type for Fairplay operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FairplayError {
    /// The schedule has no rounds at all
    #[error("Schedule contains no rounds")]
    EmptySchedule,

    /// Round numbers must run 1, 2, 3, ... in order
    #[error("Round at position {position} is numbered {found}, expected {position}")]
    RoundOutOfSequence { position: usize, found: RoundNumber },

    /// A court does not hold four distinct players
    #[error("Round {round}, Court {court}: player {player} appears more than once on the court")]
    DuplicateOnCourt {
        round: RoundNumber,
        court: CourtNumber,
        player: PlayerId,
    },

    /// A player is placed twice within the same round
    #[error("Round {round}: player {player} is assigned more than once")]
    DuplicateInRound { round: RoundNumber, player: PlayerId },

    /// A player from the universe is neither on a court nor on a bye
    #[error("Round {round}: player {player} is missing")]
    MissingFromRound { round: RoundNumber, player: PlayerId },

    /// An iron player was given a bye
    #[error("Round {round}: iron player {player} is on a bye")]
    IronPlayerOnBye { round: RoundNumber, player: PlayerId },

    /// Schedule shape disagrees with its metadata
    #[error("Schedule declares {declared} {field} but contains {actual}")]
    SizingMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    /// A tier or iron list names a player outside the schedule
    #[error("Player {0} is not part of the schedule")]
    UnknownPlayer(PlayerId),

    /// A player was placed in both the top and bottom tier
    #[error("Player {0} is in both the top and bottom tier")]
    OverlappingTiers(PlayerId),

    /// A result references a round that does not exist
    #[error("Round {0} does not exist")]
    UnknownRound(RoundNumber),

    /// A result references a court that does not exist
    #[error("Round {round}, Court {court} does not exist")]
    UnknownCourt {
        round: RoundNumber,
        court: CourtNumber,
    },

    /// A result is missing one of its scores
    #[error("Round {round}, Court {court}: both team scores are required")]
    MissingScore {
        round: RoundNumber,
        court: CourtNumber,
    },

    /// Doubles matches cannot be drawn
    #[error("Round {round}, Court {court}: tied score {score}-{score} is not allowed")]
    TiedScore {
        round: RoundNumber,
        court: CourtNumber,
        score: u32,
    },

    /// Submitted teams differ from the scheduled teams
    #[error("Round {round}, Court {court}: teams do not match the schedule")]
    TeamMismatch {
        round: RoundNumber,
        court: CourtNumber,
    },

    /// Search size range or budget is unusable
    #[error("Invalid search parameters: {0}")]
    InvalidSearch(String),

    /// Search was cancelled before any trial completed
    #[error("Search was cancelled")]
    Cancelled,

    /// Invalid operation for the current tournament state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Schedule or result document could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Schedule file could not be read
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FairplayError {
    fn from(err: std::io::Error) -> Self {
        FairplayError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FairplayError {
    fn from(err: serde_json::Error) -> Self {
        FairplayError::Decode(err.to_string())
    }
}

/// Result type alias for Fairplay operations
pub type Result<T> = std::result::Result<T, FairplayError>;
