use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::ranking::Category;
use crate::seat::SeatId;

/// What one winning seat receives at the end of a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub seat_id: SeatId,
    pub amount: u32,
    /// `None` when the pot was won uncontested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// The five cards that make the hand; `None` when uncontested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

/// How the pot was settled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// True when every other seat folded and no hands were compared
    pub uncontested: bool,
    pub pot: u32,
    pub winners: Vec<Award>,
}

impl ShowdownResult {
    pub fn award_for(&self, seat_id: &str) -> u32 {
        self.winners
            .iter()
            .filter(|a| a.seat_id == seat_id)
            .map(|a| a.amount)
            .sum()
    }
}

/// Splits `pot` evenly over `winners` shares. Odd chips go one at a time to the
/// first winners, so callers pass winners ordered from the seat after the
/// button.
///
/// ```
/// use holdem_engine::pot::split_pot;
///
/// assert_eq!(split_pot(10, 3), vec![4, 3, 3]);
/// assert_eq!(split_pot(9, 1), vec![9]);
/// ```
pub fn split_pot(pot: u32, winners: usize) -> Vec<u32> {
    if winners == 0 {
        return Vec::new();
    }
    let n = winners as u32;
    let share = pot / n;
    let odd = (pot % n) as usize;
    (0..winners)
        .map(|i| if i < odd { share + 1 } else { share })
        .collect()
}

/// Seat indices in settlement order: the seat after the button first, the
/// button last.
pub fn order_from_button(button: usize, seats: usize) -> impl Iterator<Item = usize> {
    (1..=seats).map(move |step| (button + step) % seats)
}
