//! # holdem-engine: single-hand hold'em betting core
//!
//! Runs one hand for 2–9 seats from blind posting to showdown: whose turn it
//! is, what is legal, what each action costs, when a street closes, and which
//! five cards each winner shows.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded ChaCha20 shuffle and draw-without-replacement
//! - [`seat`] - Per-hand seat record, roles and seat bounds
//! - [`rules`] - Action types, legal-action menu and action validation
//! - [`game`] - The betting state machine
//! - [`pot`] - Showdown results and pot splitting
//! - [`ranking`] - Hand ranking oracle trait and the stock ranker
//! - [`select`] - Best-five display card selection
//! - [`logger`] - Streets, action log and JSONL hand history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use holdem_engine::game::{Game, HandConfig};
//! use holdem_engine::logger::Street;
//! use holdem_engine::ranking::StandardRanker;
//! use holdem_engine::rules::Action;
//! use holdem_engine::seat::SeatSpec;
//!
//! let seats = vec![
//!     SeatSpec::new("ann", 100),
//!     SeatSpec::new("ben", 100),
//!     SeatSpec::new("cat", 100),
//! ];
//! let mut game = Game::create(seats, HandConfig::new(1).with_seed(42), Arc::new(StandardRanker))
//!     .expect("valid table");
//!
//! // button first preflop, then the blinds
//! game.apply_action("ann", Action::Fold).unwrap();
//! game.apply_action("ben", Action::Fold).unwrap();
//!
//! assert_eq!(game.street(), Street::Showdown);
//! assert_eq!(game.showdown().unwrap().award_for("cat"), 3);
//! ```
//!
//! ## Selecting display cards
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::ranking::{HandRanker, StandardRanker};
//! use holdem_engine::select::select_five;
//!
//! let cards = parse_cards("9h Qh 4h Ks Qs 7h 6h").unwrap();
//! let rank = StandardRanker.classify(&cards);
//! let shown = select_five(&cards, rank.category);
//! assert!(shown.iter().all(|c| c.to_string().ends_with('h')));
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod logger;
pub mod pot;
pub mod ranking;
pub mod rules;
pub mod seat;
pub mod select;
