use thiserror::Error;

use crate::logger::Street;

/// Every way a hand operation can be refused. A returned error never leaves the
/// game half-mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("At least {minimum} seats are required, got {actual}")]
    InsufficientPlayers { minimum: usize, actual: usize },
    #[error("At most {maximum} seats are allowed, got {actual}")]
    TooManyPlayers { maximum: usize, actual: usize },
    #[error("Seat {0} must start with a positive stack")]
    EmptyStack(String),
    #[error("Seat id {0} is used more than once")]
    DuplicateSeat(String),
    #[error("Combined starting stacks of {total} exceed the {maximum} chip limit")]
    ChipOverflow { total: u64, maximum: u32 },
    #[error("Small blind must be positive")]
    InvalidBlind,
    #[error("Seat not found: {0}")]
    SeatNotFound(String),
    #[error("It's not seat {actual}'s turn (expected {expected:?})")]
    WrongTurn {
        expected: Option<String>,
        actual: String,
    },
    #[error("No betting is possible on street {0:?}")]
    InvalidStreet(Street),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Invalid raise to {target}: must be between {minimum} and {maximum}")]
    InvalidRaise {
        target: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("Cannot check while {owed} is owed")]
    InvalidCheck { owed: u32 },
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    /// Drawing past the 52nd card. Unreachable while the seat bound holds.
    #[error("Deck exhausted")]
    DeckExhausted,
}

impl GameError {
    /// True for errors that indicate a broken engine invariant rather than a bad
    /// request.
    pub fn is_internal(&self) -> bool {
        matches!(self, GameError::DeckExhausted)
    }
}
