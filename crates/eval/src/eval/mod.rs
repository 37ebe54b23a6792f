// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! Evaluates 5, 6, and 7 cards poker hands by counting ranks and suits into bit
//! masks, the resulting [HandValue] packs the hand category and its kickers into
//! a single integer so that hands compare with plain integer ordering.
use serde::{Deserialize, Serialize};
use std::fmt;

use duel_cards::{Card, Rank};

/// The category of a poker hand, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    fn from_bits(bits: u32) -> HandRank {
        use HandRank::*;
        match bits {
            0 => HighCard,
            1 => OnePair,
            2 => TwoPair,
            3 => ThreeOfAKind,
            4 => Straight,
            5 => Flush,
            6 => FullHouse,
            7 => FourOfAKind,
            _ => StraightFlush,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandRank::HighCard => "high card",
            HandRank::OnePair => "one pair",
            HandRank::TwoPair => "two pair",
            HandRank::ThreeOfAKind => "three of a kind",
            HandRank::Straight => "straight",
            HandRank::Flush => "flush",
            HandRank::FullHouse => "full house",
            HandRank::FourOfAKind => "four of a kind",
            HandRank::StraightFlush => "straight flush",
        };

        write!(f, "{label}")
    }
}

/// The value of a poker hand, a higher value is a stronger hand and equal
/// values are tied hands.
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|cccc1111|22223333|44445555|
///   +--------+--------+--------+--------+
///   c = hand category
///   1..5 = ranks of the cards that break ties, most significant first
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    const RANKS: usize = 13;
    const WHEEL: u16 = 0b1_0000_0000_1111;

    /// Evaluates a hand of 5 to 7 cards.
    ///
    /// Panics if the hand has fewer than 5 cards or more than 7.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "5 <= cards.len() <= 7, got {}",
            cards.len()
        );

        let mut counts = [0u8; Self::RANKS];
        let mut suits = [0u16; 4];
        let mut ranks = 0u16;

        for card in cards {
            let rank = card.rank() as usize;
            counts[rank] += 1;
            suits[card.suit() as usize] |= 1 << rank;
            ranks |= 1 << rank;
        }

        if let Some(flush) = suits.iter().copied().find(|s| s.count_ones() >= 5) {
            return match Self::straight_high(flush) {
                Some(high) => Self::pack(HandRank::StraightFlush, &[high]),
                None => Self::pack(HandRank::Flush, &Self::top_ranks(flush, 5)),
            };
        }

        // Ranks grouped by their count, highest rank first.
        let mut quads = Vec::with_capacity(1);
        let mut trips = Vec::with_capacity(2);
        let mut pairs = Vec::with_capacity(3);
        let mut singles = Vec::with_capacity(7);
        for rank in (0..Self::RANKS as u8).rev() {
            match counts[rank as usize] {
                4 => quads.push(rank),
                3 => trips.push(rank),
                2 => pairs.push(rank),
                1 => singles.push(rank),
                _ => {}
            }
        }

        if let Some(&quad) = quads.first() {
            let kicker = (0..Self::RANKS as u8)
                .rev()
                .find(|&r| r != quad && counts[r as usize] > 0)
                .unwrap_or_default();
            return Self::pack(HandRank::FourOfAKind, &[quad, kicker]);
        }

        if let Some(&trip) = trips.first() {
            let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
            if let Some(pair) = pair {
                return Self::pack(HandRank::FullHouse, &[trip, pair]);
            }
        }

        if let Some(high) = Self::straight_high(ranks) {
            return Self::pack(HandRank::Straight, &[high]);
        }

        if let Some(&trip) = trips.first() {
            let mut kickers = vec![trip];
            kickers.extend(singles.iter().take(2));
            return Self::pack(HandRank::ThreeOfAKind, &kickers);
        }

        match pairs.as_slice() {
            [high, low, rest @ ..] => {
                let kicker = rest
                    .first()
                    .copied()
                    .into_iter()
                    .chain(singles.first().copied())
                    .max()
                    .unwrap_or_default();
                Self::pack(HandRank::TwoPair, &[*high, *low, kicker])
            }
            [pair] => {
                let mut kickers = vec![*pair];
                kickers.extend(singles.iter().take(3));
                Self::pack(HandRank::OnePair, &kickers)
            }
            [] => Self::pack(HandRank::HighCard, &singles[..5]),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::from_bits(self.0 >> 20)
    }

    /// The packed value, higher is better.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The highest card of a straight in the `ranks` mask if any.
    fn straight_high(ranks: u16) -> Option<u8> {
        (4..Self::RANKS as u8)
            .rev()
            .find(|&high| {
                let window = 0b1_1111 << (high - 4);
                ranks & window == window
            })
            .or_else(|| (ranks & Self::WHEEL == Self::WHEEL).then_some(Rank::Five as u8))
    }

    /// The `n` highest ranks in a mask.
    fn top_ranks(ranks: u16, n: usize) -> Vec<u8> {
        (0..Self::RANKS as u8)
            .rev()
            .filter(|r| ranks & (1 << r) != 0)
            .take(n)
            .collect()
    }

    fn pack(rank: HandRank, kickers: &[u8]) -> HandValue {
        let value = kickers
            .iter()
            .chain(std::iter::repeat(&0))
            .take(5)
            .fold(rank as u32, |acc, &k| (acc << 4) | k as u32);
        HandValue(value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank())
    }
}
