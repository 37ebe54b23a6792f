// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker Duel hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. To use the evaluator create
//! a hand and use [HandValue] to evaluate the hand and get its rank:
//!
//! ```
//! # use duel_eval::*;
//! let cards = ["2C", "3C", "4C", "5C", "7D", "8D", "9D", "10D", "JD", "QD"]
//!     .iter()
//!     .map(|t| t.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert!(v2 > v1);
//! assert_eq!(v2.rank(), HandRank::StraightFlush);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use duel_cards::{Card, Deck, Rank, Suit};
