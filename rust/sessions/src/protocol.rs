//! Request and response shapes exchanged with whatever transport sits on top
//! of the registry.

use holdem_engine::cards::Card;
use holdem_engine::errors::GameError;
use holdem_engine::game::Game;
use holdem_engine::logger::Street;
use holdem_engine::pot::{Award, ShowdownResult};
use holdem_engine::rules::{Action, LegalAction};
use holdem_engine::seat::{Role, Seat, SeatId, SeatSpec, SeatStatus};
use serde::{Deserialize, Serialize};

use crate::registry::GameId;

/// Parameters for starting a hand. Missing values fall back to the registry
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub seats: Vec<SeatSpec>,
    #[serde(default)]
    pub small_blind: Option<u32>,
    #[serde(default)]
    pub button: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CreateRequest {
    pub fn new(seats: Vec<SeatSpec>) -> Self {
        Self {
            seats,
            small_blind: None,
            button: 0,
            seed: None,
        }
    }

    pub fn with_small_blind(mut self, small_blind: u32) -> Self {
        self.small_blind = Some(small_blind);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_button(mut self, button: usize) -> Self {
        self.button = button;
        self
    }
}

/// An action as it arrives from the outside: a name plus an optional amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub seat_id: SeatId,
    pub action: String,
    /// "Raise to" total; ignored for every other action
    #[serde(default)]
    pub amount: u32,
}

impl ActionRequest {
    pub fn new(seat_id: impl Into<SeatId>, action: impl Into<String>, amount: u32) -> Self {
        Self {
            seat_id: seat_id.into(),
            action: action.into(),
            amount,
        }
    }

    pub fn decode(&self) -> Result<Action, GameError> {
        Action::parse(&self.action, self.amount)
    }
}

/// A seat as its owner sees it right after the deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtSeat {
    pub id: SeatId,
    pub index: usize,
    pub role: Role,
    pub stack: u32,
    pub hole_cards: [Card; 2],
}

impl From<&Seat> for DealtSeat {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id().to_string(),
            index: seat.index(),
            role: seat.role(),
            stack: seat.stack(),
            hole_cards: seat.hole_cards(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSession {
    pub game_id: GameId,
    pub hand_id: String,
    pub seats: Vec<DealtSeat>,
    pub table: TableView,
}

/// Public view of one seat. Hole cards only appear once shown down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: SeatId,
    pub index: usize,
    pub role: Role,
    pub status: SeatStatus,
    pub stack: u32,
    pub contribution: u32,
    pub all_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<[Card; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPot {
    pub seat_id: SeatId,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownView {
    pub uncontested: bool,
    pub pot: u32,
    pub winners: Vec<Award>,
}

impl From<&ShowdownResult> for ShowdownView {
    fn from(result: &ShowdownResult) -> Self {
        Self {
            uncontested: result.uncontested,
            pot: result.pot,
            winners: result.winners.clone(),
        }
    }
}

/// Everything a client needs to render the table after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub game_id: GameId,
    pub seat_to_act: Option<SeatId>,
    pub street: Street,
    pub community_cards: Vec<Card>,
    pub seats: Vec<SeatView>,
    pub pot_per_seat: Vec<SeatPot>,
    pub total_pot: u32,
    pub legal_actions: Vec<LegalAction>,
    pub street_advanced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showdown: Option<ShowdownView>,
    /// Set when the hand settled but could not be written to the history
    /// file. The hand itself is unaffected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_error: Option<String>,
}

impl TableView {
    pub fn of(game_id: &str, game: &Game, street_advanced: bool) -> Self {
        let seats = game
            .seats()
            .iter()
            .map(|s| SeatView {
                id: s.id().to_string(),
                index: s.index(),
                role: s.role(),
                status: s.status(),
                stack: s.stack(),
                contribution: s.contribution(),
                all_in: s.is_all_in(),
                hole_cards: game.is_revealed(s).then(|| s.hole_cards()),
            })
            .collect();
        let pot_per_seat = game
            .pot_per_seat()
            .into_iter()
            .map(|(seat_id, amount)| SeatPot { seat_id, amount })
            .collect();

        Self {
            game_id: game_id.to_string(),
            seat_to_act: game.seat_to_act().map(|s| s.id().to_string()),
            street: game.street(),
            community_cards: game.board().to_vec(),
            seats,
            pot_per_seat,
            total_pot: game.total_pot(),
            legal_actions: game.legal_actions(),
            street_advanced,
            showdown: game.showdown().map(ShowdownView::from),
            history_error: None,
        }
    }
}
