//! Picks the five cards to show for an already classified hand.
//!
//! Display only: winners are decided by [`crate::ranking::HandRanker`]
//! strength. Cards are sorted rank-then-suit (high first) before any grouping,
//! so the same cards in any order give the same five.

use std::cmp::Reverse;

use crate::cards::{Card, Rank, Suit};
use crate::ranking::Category;

/// Returns five distinct cards from `cards` (5–7 of them) that make up
/// `category`. When the pattern is missing, e.g. a ranker that disagrees with
/// this module, the five highest cards are returned instead.
///
/// Fewer than five input cards yields as many as there are; callers always pass
/// hole cards plus a full board.
pub fn select_five(cards: &[Card], category: Category) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_unstable_by_key(|c| Reverse((c.rank, c.suit)));
    sorted.dedup();

    let picked = match category {
        Category::StraightFlush => {
            let suited = largest_suit_group(&sorted);
            straight_in(&suited)
        }
        Category::Flush => {
            let suited = largest_suit_group(&sorted);
            (suited.len() >= 5).then(|| suited[..5].to_vec())
        }
        Category::FourOfAKind => group_plus_kickers(&sorted, &[4], 1),
        Category::FullHouse => full_house(&sorted),
        Category::Straight => straight_in(&sorted),
        Category::ThreeOfAKind => group_plus_kickers(&sorted, &[3], 2),
        Category::TwoPair => group_plus_kickers(&sorted, &[2, 2], 1),
        Category::OnePair => group_plus_kickers(&sorted, &[2], 3),
        Category::HighCard => None,
    };

    picked.unwrap_or_else(|| sorted.iter().take(5).copied().collect())
}

/// Cards of the most common suit, high first. Ties go to the higher suit.
fn largest_suit_group(sorted: &[Card]) -> Vec<Card> {
    let mut best: Vec<Card> = Vec::new();
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let group: Vec<Card> = sorted.iter().filter(|c| c.suit == suit).copied().collect();
        if group.len() > best.len() {
            best = group;
        }
    }
    best
}

/// Highest run of five consecutive ranks, falling back to the 5-4-3-2-A wheel.
fn straight_in(sorted: &[Card]) -> Option<Vec<Card>> {
    // one card per rank, the first (highest suit) seen
    let mut uniq: Vec<Card> = Vec::with_capacity(sorted.len());
    for c in sorted {
        if uniq.last().map_or(true, |l: &Card| l.rank != c.rank) {
            uniq.push(*c);
        }
    }

    for window in uniq.windows(5) {
        let consecutive = window
            .windows(2)
            .all(|pair| pair[0].rank.value() == pair[1].rank.value() + 1);
        if consecutive {
            return Some(window.to_vec());
        }
    }

    let ace = uniq.iter().find(|c| c.rank == Rank::Ace)?;
    let mut wheel = Vec::with_capacity(5);
    for rank in [Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
        wheel.push(*uniq.iter().find(|c| c.rank == rank)?);
    }
    wheel.push(*ace);
    Some(wheel)
}

/// Takes rank groups of the requested sizes (highest qualifying rank first),
/// then fills with the highest remaining cards.
fn group_plus_kickers(sorted: &[Card], sizes: &[usize], kickers: usize) -> Option<Vec<Card>> {
    let mut picked: Vec<Card> = Vec::with_capacity(5);
    for &size in sizes {
        let rank = ranks_with_at_least(sorted, size)
            .into_iter()
            .find(|r| !picked.iter().any(|c| c.rank == *r))?;
        picked.extend(sorted.iter().filter(|c| c.rank == rank).take(size));
    }
    let rest: Vec<Card> = sorted
        .iter()
        .filter(|c| !picked.contains(c))
        .take(kickers)
        .copied()
        .collect();
    picked.extend(rest);
    Some(picked)
}

fn full_house(sorted: &[Card]) -> Option<Vec<Card>> {
    let trips = *ranks_with_at_least(sorted, 3).first()?;
    let pair = ranks_with_at_least(sorted, 2)
        .into_iter()
        .find(|&r| r != trips)?;
    let mut picked: Vec<Card> = sorted.iter().filter(|c| c.rank == trips).take(3).copied().collect();
    picked.extend(sorted.iter().filter(|c| c.rank == pair).take(2));
    Some(picked)
}

/// Ranks holding at least `n` cards, high first.
fn ranks_with_at_least(sorted: &[Card], n: usize) -> Vec<Rank> {
    let mut ranks: Vec<Rank> = Vec::new();
    for c in sorted {
        if ranks.contains(&c.rank) {
            continue;
        }
        if sorted.iter().filter(|o| o.rank == c.rank).count() >= n {
            ranks.push(c.rank);
        }
    }
    ranks
}
