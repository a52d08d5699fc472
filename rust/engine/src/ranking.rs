//! Hand classification seam.
//!
//! The betting machine never scores hands itself: it asks a [`HandRanker`] for
//! a category and a comparable strength. [`StandardRanker`] is the stock
//! implementation; callers may inject their own.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Result of classifying 5–7 cards. Higher `strength` wins; equal strength
/// splits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub strength: u32,
}

/// The hand ranking oracle consulted at showdown.
pub trait HandRanker: Debug + Send + Sync {
    fn classify(&self, cards: &[Card]) -> HandRank;
}

/// Best-of-seven evaluator. Ace plays low in the 5-4-3-2-A straight.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn classify(&self, cards: &[Card]) -> HandRank {
        let (category, kickers) = evaluate(cards);
        HandRank {
            category,
            strength: pack(category, &kickers),
        }
    }
}

// category in the top bits, then five 4-bit kicker slots high -> low
fn pack(category: Category, kickers: &[u8; 5]) -> u32 {
    kickers
        .iter()
        .fold(category as u32, |acc, &k| (acc << 4) | u32::from(k & 0x0f))
}

fn evaluate(cards: &[Card]) -> (Category, [u8; 5]) {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_masks = [0u16; 4];
    let mut suit_counts = [0u8; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = c.suit as usize;
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
    }

    let flush_suit = (0..4).find(|&s| suit_counts[s] >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(suit_masks[s]) {
            return (Category::StraightFlush, [high, 0, 0, 0, 0]);
        }
    }

    // ranks grouped by multiplicity, each list high -> low
    let by_count = |n: u8| -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|&r| rank_counts[r as usize] == n)
            .collect()
    };
    let quads = by_count(4);
    let trips = by_count(3);
    let pairs = by_count(2);
    let highest_excluding = |skip: &[u8], n: usize| -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|r| rank_counts[*r as usize] > 0 && !skip.contains(r))
            .take(n)
            .collect()
    };

    if let Some(&q) = quads.first() {
        let kicker = highest_excluding(&[q], 1);
        return (Category::FourOfAKind, kickers_from(&[&[q][..], &kicker[..]]));
    }

    if let Some(&t) = trips.first() {
        let pair = trips.get(1).or(pairs.first());
        if let Some(&p) = pair {
            return (Category::FullHouse, [t, p, 0, 0, 0]);
        }
    }

    if let Some(s) = flush_suit {
        let ranks: Vec<u8> = (2..=14u8)
            .rev()
            .filter(|&r| (suit_masks[s] & (1 << r)) != 0)
            .take(5)
            .collect();
        return (Category::Flush, kickers_from(&[&ranks[..]]));
    }

    let all_mask = suit_masks.iter().fold(0u16, |acc, m| acc | m);
    if let Some(high) = straight_high_from_mask(all_mask) {
        return (Category::Straight, [high, 0, 0, 0, 0]);
    }

    if let Some(&t) = trips.first() {
        let rest = highest_excluding(&[t], 2);
        return (Category::ThreeOfAKind, kickers_from(&[&[t][..], &rest[..]]));
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let rest = highest_excluding(&[high, low], 1);
        return (Category::TwoPair, kickers_from(&[&[high, low][..], &rest[..]]));
    }

    if let Some(&p) = pairs.first() {
        let rest = highest_excluding(&[p], 3);
        return (Category::OnePair, kickers_from(&[&[p][..], &rest[..]]));
    }

    let highs = highest_excluding(&[], 5);
    (Category::HighCard, kickers_from(&[&highs[..]]))
}

fn kickers_from(parts: &[&[u8]]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, r) in k.iter_mut().zip(parts.iter().flat_map(|p| p.iter())) {
        *slot = *r;
    }
    k
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays as 1
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        (m & window) == window
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank(s: &str) -> HandRank {
        StandardRanker.classify(&parse_cards(s).unwrap())
    }

    #[test]
    fn classifies_each_category() {
        let cases = [
            ("Ah Kh Qh Jh Th 2c 3d", Category::StraightFlush),
            ("9c 9d 9h 9s Kc 2d 3h", Category::FourOfAKind),
            ("Kc Kd Kh Qc Qd 2h 3s", Category::FullHouse),
            ("2h 7h Jh Qh 9h Ac Kd", Category::Flush),
            ("5c 6h 7c 8h 9d 2s 2c", Category::Straight),
            ("Qc Qh Qd 2s 3c 4h 8d", Category::ThreeOfAKind),
            ("Jc Jh 4d 4s Ac 7h 2d", Category::TwoPair),
            ("Tc Th 4d 5s Ac 7h 2d", Category::OnePair),
            ("Ac Jh 4d 5s 9c 7h 2d", Category::HighCard),
        ];
        for (cards, expected) in cases {
            assert_eq!(rank(cards).category, expected, "{cards}");
        }
    }

    #[test]
    fn wheel_is_the_lowest_straight() {
        let wheel = rank("Ah 2c 3d 4s 5h Kd Qc");
        let six_high = rank("2c 3d 4s 5h 6c Kd Qc");
        assert_eq!(wheel.category, Category::Straight);
        assert!(six_high.strength > wheel.strength);
    }

    #[test]
    fn two_trips_make_a_full_house() {
        let hr = rank("8c 8d 8h 3c 3d 3h Ac");
        assert_eq!(hr.category, Category::FullHouse);
        assert!(hr.strength > rank("8c 8d 8h 2c 2d Kh Ac").strength);
    }

    #[test]
    fn kickers_break_ties_and_board_plays_split() {
        let ak = rank("Ac Kd 7h 7s 2c 9d 4h");
        let aq = rank("Ac Qd 7h 7s 2c 9d 4h");
        assert!(ak.strength > aq.strength);

        let a = rank("2c 3d Ah Kh Qh Jh Th");
        let b = rank("4c 5d Ah Kh Qh Jh Th");
        assert_eq!(a.strength, b.strength);
    }

    #[test]
    fn category_dominates_kickers() {
        assert!(rank("2c 2d 3h 4s 6c 8d 9h").strength > rank("Ac Kd Qh Js 9c 8d 2h").strength);
    }
}
