// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker Duel cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use duel_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td: Card = "10D".parse().unwrap();
//! assert_eq!(ah.code(), 1);
//! assert_eq!(td.to_string(), "10D");
//! ```
//!
//! the card token codec used by the chat front end:
//!
//! ```
//! # use duel_cards::{token_code, INVALID_CODE};
//! assert_eq!(token_code("AS"), 0);
//! assert_eq!(token_code("2C"), 51);
//! assert_eq!(token_code("1X"), INVALID_CODE);
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards, a deck can be stacked
//! with a given sequence of cards to replay a hand:
//!
//! ```
//! # use duel_cards::{Card, Deck};
//! # use rand::{rngs::StdRng, SeedableRng};
//! let top = vec!["9C".parse::<Card>().unwrap(), "4H".parse().unwrap()];
//! let mut deck = Deck::stacked(&top, &mut StdRng::seed_from_u64(1));
//! assert_eq!(deck.deal(), top[0]);
//! assert_eq!(deck.deal(), top[1]);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{token_code, Card, Deck, ParseCardError, Rank, Suit, INVALID_CODE};
