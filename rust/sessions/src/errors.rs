//! Error types for the session registry and their machine-readable form.
//!
//! Every [`SessionError`] maps to a stable error code and a severity, so a
//! transport layer can turn it into an [`ErrorResponse`] without matching on
//! variants itself.

use holdem_engine::errors::GameError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;

use crate::registry::GameId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(GameId),
    #[error("Session already exists: {0}")]
    AlreadyExists(GameId),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Session storage poisoned")]
    StoragePoisoned,
    #[error("Failed to record hand history: {0}")]
    History(String),
}

/// Standard error body handed to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "session_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Bad request from the caller; the session is unchanged
    Client,
    /// Failure outside the game itself, e.g. history I/O
    Server,
    /// Registry or engine invariants no longer hold
    Critical,
}

/// Conversion of an error into its reported form.
pub trait IntoErrorResponse {
    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Client
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self.error_details() {
            Some(details) => {
                ErrorResponse::with_details(self.error_code(), self.error_message(), details)
            }
            None => ErrorResponse::new(self.error_code(), self.error_message()),
        }
    }

    /// Builds the response and logs it at the level matching its severity.
    fn report(&self) -> ErrorResponse {
        let response = self.to_error_response();
        match self.severity() {
            ErrorSeverity::Client => {
                tracing::info!(code = %response.error, "client error: {}", response.message)
            }
            ErrorSeverity::Server => {
                tracing::error!(code = %response.error, "server error: {}", response.message)
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    code = %response.error,
                    critical = true,
                    "critical error: {}",
                    response.message
                )
            }
        }
        response
    }
}

impl IntoErrorResponse for GameError {
    fn error_code(&self) -> &'static str {
        match self {
            GameError::InsufficientPlayers { .. } => "insufficient_players",
            GameError::TooManyPlayers { .. } => "too_many_players",
            GameError::EmptyStack(_) => "empty_stack",
            GameError::DuplicateSeat(_) => "duplicate_seat",
            GameError::ChipOverflow { .. } => "chip_overflow",
            GameError::InvalidBlind => "invalid_blind",
            GameError::SeatNotFound(_) => "seat_not_found",
            GameError::WrongTurn { .. } => "wrong_turn",
            GameError::InvalidStreet(_) => "invalid_street",
            GameError::UnknownAction(_) => "unknown_action",
            GameError::InvalidRaise { .. } => "invalid_raise",
            GameError::InvalidCheck { .. } => "invalid_check",
            GameError::InvalidCard(_) => "invalid_card",
            GameError::DeckExhausted => "deck_exhausted",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            GameError::InsufficientPlayers { minimum, actual } => {
                Some(json!({ "minimum": minimum, "actual": actual }))
            }
            GameError::TooManyPlayers { maximum, actual } => {
                Some(json!({ "maximum": maximum, "actual": actual }))
            }
            GameError::ChipOverflow { total, maximum } => {
                Some(json!({ "total": total, "maximum": maximum }))
            }
            GameError::WrongTurn { expected, actual } => {
                Some(json!({ "expected": expected, "actual": actual }))
            }
            GameError::InvalidStreet(street) => Some(json!({ "street": street })),
            GameError::InvalidRaise {
                target,
                minimum,
                maximum,
            } => Some(json!({ "target": target, "minimum": minimum, "maximum": maximum })),
            GameError::InvalidCheck { owed } => Some(json!({ "owed": owed })),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        if self.is_internal() {
            ErrorSeverity::Critical
        } else {
            ErrorSeverity::Client
        }
    }
}

impl IntoErrorResponse for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::AlreadyExists(_) => "session_exists",
            SessionError::Game(e) => e.error_code(),
            SessionError::StoragePoisoned => "storage_poisoned",
            SessionError::History(_) => "history_write_failed",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) | SessionError::AlreadyExists(id) => {
                Some(json!({ "game_id": id }))
            }
            SessionError::Game(e) => e.error_details(),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::Game(e) => e.severity(),
            SessionError::StoragePoisoned => ErrorSeverity::Critical,
            SessionError::History(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
