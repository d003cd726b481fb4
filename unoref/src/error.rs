use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Player `{0}` is seated more than once")]
    DuplicatePlayer(String),
    #[error("`{0}` cannot be used as a player id")]
    ReservedPlayerId(String),
    #[error("Unknown card value `{0}`")]
    InvalidCardValue(String),
    #[error("Message bus is closed")]
    BusClosed,
    #[error("Watcher task failed: {0}")]
    Watcher(#[from] tokio::task::JoinError),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
