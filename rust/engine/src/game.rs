use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{ActionRecord, HandRecord, SeatRecord, Street};
use crate::pot::{order_from_button, split_pot, Award, ShowdownResult};
use crate::ranking::{HandRank, HandRanker};
use crate::rules::{self, Action, LegalAction, ValidatedAction};
use crate::seat::{Role, Seat, SeatId, SeatSpec, MAX_SEATS, MIN_SEATS};
use crate::select::select_five;

/// Table parameters for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandConfig {
    pub small_blind: u32,
    /// Seat index holding the button, taken modulo the seat count
    #[serde(default)]
    pub button: usize,
    /// Shuffle seed; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl HandConfig {
    pub fn new(small_blind: u32) -> Self {
        Self {
            small_blind,
            button: 0,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_button(mut self, button: usize) -> Self {
        self.button = button;
        self
    }

    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }
}

impl Default for HandConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Effect of one accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Chips the action moved from stack to contribution
    pub chips: u32,
    /// The street changed as a consequence (including settlement)
    pub street_advanced: bool,
    /// The hand is over; no further actions are accepted
    pub settled: bool,
}

/// Small and big blind seat indices for a table of `seats` with the button at
/// `button`. Heads-up the button posts the small blind.
///
/// ```
/// use holdem_engine::game::blind_seats;
///
/// assert_eq!(blind_seats(0, 2), (0, 1));
/// assert_eq!(blind_seats(0, 3), (1, 2));
/// assert_eq!(blind_seats(4, 6), (5, 0));
/// ```
pub fn blind_seats(button: usize, seats: usize) -> (usize, usize) {
    if seats == 2 {
        (button, (button + 1) % 2)
    } else {
        ((button + 1) % seats, (button + 2) % seats)
    }
}

fn role_for(index: usize, button: usize, seats: usize) -> Role {
    let (sb, bb) = blind_seats(button, seats);
    match index {
        i if i == button && seats == 2 => Role::ButtonSmallBlind,
        i if i == button => Role::Button,
        i if i == sb => Role::SmallBlind,
        i if i == bb => Role::BigBlind,
        _ => Role::Other,
    }
}

/// Betting state machine for a single hand.
///
/// Created with blinds posted and hole cards dealt, then driven exclusively
/// through [`Game::apply_action`] until it settles. Contributions are
/// cumulative for the whole hand and are never paid back into stacks: the award
/// lives in [`Game::showdown`], and [`Game::settled_stack`] adds it up.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use holdem_engine::game::{Game, HandConfig};
/// use holdem_engine::logger::Street;
/// use holdem_engine::ranking::StandardRanker;
/// use holdem_engine::rules::Action;
/// use holdem_engine::seat::SeatSpec;
///
/// let seats = vec![SeatSpec::new("alice", 100), SeatSpec::new("bob", 100)];
/// let mut game = Game::create(seats, HandConfig::new(1).with_seed(7), Arc::new(StandardRanker))?;
///
/// game.apply_action("alice", Action::Call)?;
/// let outcome = game.apply_action("bob", Action::Check)?;
/// assert!(outcome.street_advanced);
/// assert_eq!(game.street(), Street::Flop);
/// assert_eq!(game.board().len(), 3);
/// # Ok::<(), holdem_engine::errors::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    seats: Vec<Seat>,
    button: usize,
    small_blind: u32,
    big_blind: u32,
    street: Street,
    /// Seats that acted since the last street boundary, by index
    acted: Vec<bool>,
    to_act: Option<usize>,
    board: Vec<Card>,
    deck: Deck,
    seed: u64,
    actions: Vec<ActionRecord>,
    showdown: Option<ShowdownResult>,
    ranker: Arc<dyn HandRanker>,
}

impl Game {
    /// Seats the players, shuffles, deals two hole cards each (round-robin in
    /// seat order) and posts the blinds. A seat that cannot cover its blind
    /// posts its whole stack and is all-in.
    ///
    /// # Errors
    ///
    /// [`GameError::InsufficientPlayers`] / [`GameError::TooManyPlayers`] when
    /// the seat count is outside 2..=9, [`GameError::EmptyStack`],
    /// [`GameError::DuplicateSeat`], [`GameError::ChipOverflow`] and
    /// [`GameError::InvalidBlind`] for bad setup data.
    pub fn create(
        specs: Vec<SeatSpec>,
        config: HandConfig,
        ranker: Arc<dyn HandRanker>,
    ) -> Result<Game, GameError> {
        let n = specs.len();
        if n < MIN_SEATS {
            return Err(GameError::InsufficientPlayers {
                minimum: MIN_SEATS,
                actual: n,
            });
        }
        if n > MAX_SEATS {
            return Err(GameError::TooManyPlayers {
                maximum: MAX_SEATS,
                actual: n,
            });
        }
        if config.small_blind == 0 {
            return Err(GameError::InvalidBlind);
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.stack == 0 {
                return Err(GameError::EmptyStack(spec.id.clone()));
            }
            if specs[..i].iter().any(|other| other.id == spec.id) {
                return Err(GameError::DuplicateSeat(spec.id.clone()));
            }
        }
        // the pot is a u32 sum of every stack
        let total: u64 = specs.iter().map(|s| u64::from(s.stack)).sum();
        if total > u64::from(u32::MAX) {
            return Err(GameError::ChipOverflow {
                total,
                maximum: u32::MAX,
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut deck = Deck::shuffled(seed);
        let button = config.button % n;

        let mut holes: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for hole in holes.iter_mut() {
                hole.push(deck.draw()?);
            }
        }
        let seats: Vec<Seat> = specs
            .into_iter()
            .zip(holes)
            .enumerate()
            .map(|(i, (spec, hole))| {
                Seat::new(spec, i, [hole[0], hole[1]], role_for(i, button, n))
            })
            .collect();

        let mut game = Game {
            seats,
            button,
            small_blind: config.small_blind,
            big_blind: config.big_blind(),
            street: Street::Preflop,
            acted: vec![false; n],
            to_act: None,
            board: Vec::with_capacity(5),
            deck,
            seed,
            actions: Vec::new(),
            showdown: None,
            ranker,
        };

        let (sb, bb) = blind_seats(button, n);
        game.seats[sb].commit(game.small_blind);
        game.seats[bb].commit(game.big_blind);

        game.progress((bb + 1) % n)?;
        Ok(game)
    }

    /// Applies `action` for `seat_id`, the seat to act.
    ///
    /// The request is validated completely before anything changes, so every
    /// error leaves the game as it was.
    ///
    /// # Errors
    ///
    /// - [`GameError::SeatNotFound`] for an unknown seat
    /// - [`GameError::InvalidStreet`] once the hand is settled
    /// - [`GameError::WrongTurn`] when another seat is to act
    /// - [`GameError::InvalidCheck`] / [`GameError::InvalidRaise`] from
    ///   [`rules::validate_action`]
    pub fn apply_action(
        &mut self,
        seat_id: &str,
        action: Action,
    ) -> Result<ActionOutcome, GameError> {
        let idx = self
            .seat_index(seat_id)
            .ok_or_else(|| GameError::SeatNotFound(seat_id.to_string()))?;
        if !self.street.is_betting() {
            return Err(GameError::InvalidStreet(self.street));
        }
        if self.to_act != Some(idx) {
            return Err(GameError::WrongTurn {
                expected: self.seat_to_act().map(|s| s.id().to_string()),
                actual: seat_id.to_string(),
            });
        }

        let highest = self.highest_contribution();
        let seat = &self.seats[idx];
        let validated =
            rules::validate_action(seat.stack(), seat.contribution(), highest, action)?;

        let street_before = self.street;
        let seat = &mut self.seats[idx];
        let chips = match validated {
            ValidatedAction::Fold => {
                seat.fold();
                0
            }
            ValidatedAction::Check => 0,
            ValidatedAction::Call(owed) => seat.commit(owed),
            ValidatedAction::Raise { chips, .. } => seat.commit(chips),
        };
        self.acted[idx] = true;
        self.actions.push(ActionRecord {
            seat_id: seat_id.to_string(),
            street: street_before,
            action,
            chips,
        });

        self.progress((idx + 1) % self.seats.len())?;

        Ok(ActionOutcome {
            chips,
            street_advanced: self.street != street_before,
            settled: !self.street.is_betting(),
        })
    }

    /// Menu for the seat to act; empty once nobody is to act.
    pub fn legal_actions(&self) -> Vec<LegalAction> {
        self.seat_to_act()
            .map(|seat| {
                rules::legal_actions(seat.stack(), seat.contribution(), self.highest_contribution())
            })
            .unwrap_or_default()
    }

    /// Decides who acts next, closing the street (or the hand) when nobody
    /// needs to. `start` is where the cyclic search for the next actor begins.
    fn progress(&mut self, start: usize) -> Result<(), GameError> {
        if self.active_count() == 1 {
            self.settle_uncontested();
            return Ok(());
        }
        if self.betting_closed() {
            return self.run_out();
        }
        if let Some(next) = self.next_needing_action(start) {
            self.to_act = Some(next);
            return Ok(());
        }
        self.close_street()
    }

    /// Deals the next street and hands the action to the first seat after
    /// the button, or goes to showdown after the river.
    fn close_street(&mut self) -> Result<(), GameError> {
        let Some((next, count)) = self.street.next_betting() else {
            self.showdown_by_rank();
            return Ok(());
        };
        let dealt = self.deck.draw_n(count)?;
        self.board.extend(dealt);
        self.street = next;
        self.acted.iter_mut().for_each(|a| *a = false);

        // heads-up the non-button seat opens; otherwise scanning starts at the button
        let start = if self.seats.len() == 2 {
            (self.button + 1) % 2
        } else {
            self.button
        };
        self.to_act = self.scan_from(start, |_, seat| seat.can_act());
        Ok(())
    }

    /// No more betting is possible: deal the rest of the board and compare.
    fn run_out(&mut self) -> Result<(), GameError> {
        self.to_act = None;
        while let Some((next, count)) = self.street.next_betting() {
            let dealt = self.deck.draw_n(count)?;
            self.board.extend(dealt);
            self.street = next;
        }
        self.showdown_by_rank();
        Ok(())
    }

    fn settle_uncontested(&mut self) {
        let pot = self.total_pot();
        let winners = self
            .seats
            .iter()
            .filter(|s| s.is_active())
            .map(|s| Award {
                seat_id: s.id().to_string(),
                amount: pot,
                category: None,
                cards: None,
            })
            .collect();
        self.showdown = Some(ShowdownResult {
            uncontested: true,
            pot,
            winners,
        });
        self.street = Street::Showdown;
        self.to_act = None;
    }

    fn showdown_by_rank(&mut self) {
        let pot = self.total_pot();
        let contenders: Vec<(usize, HandRank, Vec<Card>)> =
            order_from_button(self.button, self.seats.len())
                .filter(|&i| self.seats[i].is_active())
                .map(|i| {
                    let mut cards = self.seats[i].hole_cards().to_vec();
                    cards.extend_from_slice(&self.board);
                    (i, self.ranker.classify(&cards), cards)
                })
                .collect();

        let best = contenders
            .iter()
            .map(|(_, rank, _)| rank.strength)
            .max()
            .unwrap_or_default();
        let winners: Vec<&(usize, HandRank, Vec<Card>)> = contenders
            .iter()
            .filter(|(_, rank, _)| rank.strength == best)
            .collect();
        let shares = split_pot(pot, winners.len());

        let awards = winners
            .into_iter()
            .zip(shares)
            .map(|((i, rank, cards), amount)| Award {
                seat_id: self.seats[*i].id().to_string(),
                amount,
                category: Some(rank.category),
                cards: Some(select_five(cards, rank.category)),
            })
            .collect();

        self.showdown = Some(ShowdownResult {
            uncontested: false,
            pot,
            winners: awards,
        });
        self.street = Street::Finished;
        self.to_act = None;
    }

    /// True when at most one seat can still bet and it owes nothing.
    fn betting_closed(&self) -> bool {
        let highest = self.highest_contribution();
        let mut able = self.seats.iter().filter(|s| s.can_act());
        match (able.next(), able.next()) {
            (None, _) => true,
            (Some(only), None) => only.contribution() >= highest,
            _ => false,
        }
    }

    fn next_needing_action(&self, start: usize) -> Option<usize> {
        let highest = self.highest_contribution();
        self.scan_from(start, |i, seat| {
            seat.can_act() && (!self.acted[i] || seat.contribution() < highest)
        })
    }

    /// First seat index from `start` (inclusive) satisfying `pred`, looking at
    /// each seat once.
    fn scan_from(&self, start: usize, pred: impl Fn(usize, &Seat) -> bool) -> Option<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|step| (start + step) % n)
            .find(|&i| pred(i, &self.seats[i]))
    }

    fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    fn seat_index(&self, seat_id: &str) -> Option<usize> {
        self.seats.iter().position(|s| s.id() == seat_id)
    }

    /// Highest contribution among seats that have not folded.
    pub fn highest_contribution(&self) -> u32 {
        self.seats
            .iter()
            .filter(|s| s.is_active())
            .map(Seat::contribution)
            .max()
            .unwrap_or(0)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seat_index(seat_id).map(|i| &self.seats[i])
    }

    pub fn seat_to_act(&self) -> Option<&Seat> {
        self.to_act.map(|i| &self.seats[i])
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn showdown(&self) -> Option<&ShowdownResult> {
        self.showdown.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        !self.street.is_betting()
    }

    /// Contribution of every seat, in seat order.
    pub fn pot_per_seat(&self) -> Vec<(SeatId, u32)> {
        self.seats
            .iter()
            .map(|s| (s.id().to_string(), s.contribution()))
            .collect()
    }

    pub fn total_pot(&self) -> u32 {
        self.seats.iter().map(Seat::contribution).sum()
    }

    /// Whether the seat's hole cards were shown at an evaluated showdown.
    pub fn is_revealed(&self, seat: &Seat) -> bool {
        self.street == Street::Finished && seat.is_active()
    }

    /// Stack after the pot is paid out. Until the hand settles this is just the
    /// current stack.
    pub fn settled_stack(&self, seat_id: &str) -> Option<u32> {
        let seat = self.seat(seat_id)?;
        let award = self
            .showdown
            .as_ref()
            .map(|result| result.award_for(seat_id))
            .unwrap_or(0);
        Some(seat.stack() + award)
    }

    pub fn hand_record(&self, hand_id: impl Into<String>) -> HandRecord {
        let seats = self
            .seats
            .iter()
            .map(|s| SeatRecord {
                seat_id: s.id().to_string(),
                initial_stack: s.initial_stack(),
                contribution: s.contribution(),
                hole_cards: self.is_revealed(s).then(|| s.hole_cards()),
            })
            .collect();
        HandRecord {
            hand_id: hand_id.into(),
            seed: self.seed,
            small_blind: self.small_blind,
            button: self.button,
            seats,
            actions: self.actions.clone(),
            board: self.board.clone(),
            street: self.street,
            showdown: self.showdown.clone(),
            ts: None,
        }
    }
}
