use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn fresh_deck_has_52_unique_cards() {
    let mut deck = Deck::shuffled(42);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        deck.deal_card().is_none(),
        "after 52 cards, deck should be empty"
    );
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::shuffled(12345);
    let mut d2 = Deck::shuffled(12345);
    let a: Vec<Card> = d1.draw_n(10).unwrap();
    let b: Vec<Card> = d2.draw_n(10).unwrap();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let a = Deck::shuffled(1).draw_n(10).unwrap();
    let b = Deck::shuffled(2).draw_n(10).unwrap();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn drawing_past_the_end_is_an_internal_error() {
    let mut deck = Deck::shuffled(9);
    deck.draw_n(52).unwrap();
    assert_eq!(deck.remaining(), 0);
    let err = deck.draw().unwrap_err();
    assert_eq!(err, GameError::DeckExhausted);
    assert!(err.is_internal());
}
