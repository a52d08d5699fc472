use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Externally assigned seat identifier, unique within one game.
pub type SeatId = String;

/// Fewest seats a hand can be dealt to.
pub const MIN_SEATS: usize = 2;
/// Most seats a hand can be dealt to.
pub const MAX_SEATS: usize = 9;

/// Table role for the hand. Heads-up the button also posts the small blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    ButtonSmallBlind,
    SmallBlind,
    BigBlind,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Active,
    Folded,
}

/// Seat description handed in when a game is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub id: SeatId,
    pub stack: u32,
}

impl SeatSpec {
    pub fn new(id: impl Into<SeatId>, stack: u32) -> Self {
        Self {
            id: id.into(),
            stack,
        }
    }
}

/// Per-hand record of one seat.
///
/// `stack + contribution` always equals the stack the seat started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    index: usize,
    initial_stack: u32,
    stack: u32,
    contribution: u32,
    hole: [Card; 2],
    status: SeatStatus,
    role: Role,
}

impl Seat {
    pub(crate) fn new(spec: SeatSpec, index: usize, hole: [Card; 2], role: Role) -> Self {
        Self {
            id: spec.id,
            index,
            initial_stack: spec.stack,
            stack: spec.stack,
            contribution: 0,
            hole,
            status: SeatStatus::Active,
            role,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn initial_stack(&self) -> u32 {
        self.initial_stack
    }
    pub fn contribution(&self) -> u32 {
        self.contribution
    }
    pub fn hole_cards(&self) -> [Card; 2] {
        self.hole
    }
    pub fn status(&self) -> SeatStatus {
        self.status
    }
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.status == SeatStatus::Active
    }

    pub fn is_all_in(&self) -> bool {
        self.is_active() && self.stack == 0
    }

    /// Active and still holding chips, i.e. able to take a betting decision.
    pub fn can_act(&self) -> bool {
        self.is_active() && self.stack > 0
    }

    /// Moves up to `amount` chips from stack to contribution and returns what
    /// was actually committed. Short stacks commit everything.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.contribution += paid;
        paid
    }

    pub(crate) fn fold(&mut self) {
        self.status = SeatStatus::Folded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn seat(stack: u32) -> Seat {
        let hole = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        Seat::new(SeatSpec::new("p", stack), 0, hole, Role::Other)
    }

    #[test]
    fn commit_moves_chips_and_caps_at_stack() {
        let mut s = seat(10);
        assert_eq!(s.commit(4), 4);
        assert_eq!((s.stack(), s.contribution()), (6, 4));
        assert_eq!(s.commit(50), 6);
        assert_eq!((s.stack(), s.contribution()), (0, 10));
        assert!(s.is_all_in());
        assert!(!s.can_act());
    }

    #[test]
    fn folded_seat_is_not_all_in() {
        let mut s = seat(3);
        s.commit(3);
        s.fold();
        assert!(!s.is_active());
        assert!(!s.is_all_in());
    }
}
