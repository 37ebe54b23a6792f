// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker game.
use serde::{Deserialize, Serialize};
use std::{fmt, ops};

pub use duel_cards::{token_code, Card, Deck, ParseCardError, Rank, Suit, INVALID_CODE};
pub use duel_eval::{HandRank, HandValue};

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl ops::Mul<u32> for Chips {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % rhs)
    }
}

impl std::iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}

/// The stage of a hand.
///
/// Stages only move forward within a hand, a new hand starts again from
/// [Stage::Preflop].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Hole cards dealt, blinds posted.
    Preflop = 0,
    /// Three community cards.
    Flop = 1,
    /// Four community cards.
    Turn = 2,
    /// Five community cards.
    River = 3,
    /// Hand over, pots have been awarded.
    Showdown = 4,
}

impl Stage {
    /// The stage following this one, showdown is terminal.
    pub fn next(self) -> Stage {
        match self {
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }

    /// The number of community cards on the board at this stage.
    pub fn board_cards(self) -> usize {
        match self {
            Stage::Preflop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River | Stage::Showdown => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        };

        write!(f, "{label}")
    }
}

/// The turn details returned by [Game::get_current_turn](crate::Game::get_current_turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The seat whose action is awaited.
    pub seat: usize,
    /// The chips this seat committed in the current betting round.
    pub committed: Chips,
    /// The bet every seat has to match in this round.
    pub table_bet: Chips,
    /// The hand stage.
    pub stage: Stage,
    /// No more betting, the hand runs to showdown with advance.
    pub all_show: bool,
}

/// Cards used to replay a hand from a fixed sequence.
///
/// Hole cards are dealt in pairs starting from the seat after the button, the
/// board cards are dealt as community cards. Any card not listed comes from a
/// shuffled deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Hole cards in dealing order.
    pub hole_cards: Vec<(Card, Card)>,
    /// Community cards in dealing order.
    pub board: Vec<Card>,
}

impl Preset {
    /// Creates a preset from card tokens.
    pub fn parse(hole_cards: &[(&str, &str)], board: &[&str]) -> Result<Preset, ParseCardError> {
        let hole_cards = hole_cards
            .iter()
            .map(|(c1, c2)| Ok((c1.parse()?, c2.parse()?)))
            .collect::<Result<Vec<_>, ParseCardError>>()?;
        let board = board
            .iter()
            .map(|c| c.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Preset { hole_cards, board })
    }

    /// The cards in dealing order.
    pub fn cards(&self) -> Vec<Card> {
        self.hole_cards
            .iter()
            .flat_map(|(c1, c2)| [*c1, *c2])
            .chain(self.board.iter().copied())
            .collect()
    }
}

/// Ranks a seven cards hand for the showdown.
pub trait HandRanker: fmt::Debug + Send {
    /// Returns the rank of the best hand in two hole cards and five community
    /// cards, higher is better and equal ranks are ties.
    fn rank_of_seven(&self, cards: &[Card; 7]) -> u32;
}

/// The default [HandRanker] using the [HandValue] evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn rank_of_seven(&self, cards: &[Card; 7]) -> u32 {
        HandValue::eval(cards).value()
    }
}
