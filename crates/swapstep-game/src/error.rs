//! Error types for level setup

use thiserror::Error;

/// Errors raised while assembling a level.
///
/// Runtime conditions (missing teleport targets, blocked requests, unresolved
/// sounds) are never errors. They are ignored or logged where they happen.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("a player has already been spawned in this level")]
    DuplicatePlayer,

    #[error("no player was spawned before building the level")]
    MissingPlayer,

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    Config(#[from] toml::de::Error),
}
