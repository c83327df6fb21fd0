use std::io;

use thiserror::Error;

use crate::round::PlayerId;

/// Errors that can occur when manipulating the game session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("no game is in progress")]
    NotPlaying,
    #[error("invalid round: {0}")]
    InvalidRound(#[from] InvalidRound),
    #[error("invalid player name: {0}")]
    InvalidName(#[from] InvalidName),
    #[error("stored game is inconsistent: {0}")]
    CorruptState(&'static str),
}

/// Details of a round entry the score sheet would refuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRound {
    #[error("a winner must be selected")]
    MissingWinner,
    #[error("winner index {0} is out of range")]
    WinnerIndex(PlayerId),
    #[error("a color must be selected")]
    MissingColor,
    #[error("player {0} has no penalty score")]
    MissingScore(PlayerId),
    #[error("penalty score {score} for player {player} must be between 0 and {max}")]
    ScoreOutOfRange { player: PlayerId, score: i64, max: i64 },
}

/// Details of a rejected player list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidName {
    #[error("exactly {expected} player names are required, received {received}")]
    Count { expected: usize, received: usize },
    #[error("name for player {0} is empty")]
    Empty(PlayerId),
    #[error("name for player {player} is longer than {max} characters")]
    TooLong { player: PlayerId, max: usize },
}

/// Failures while reading or writing the persisted record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored record is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}
