// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker Duel betting engine.
//!
//! ```
//! # use duel_core::*;
//! let mut game = Game::new(&[Chips::new(35); 2], Chips::new(2)).unwrap();
//! game.new_hand(None).unwrap();
//!
//! let turn = game.get_current_turn();
//! assert_eq!(turn.stage, Stage::Preflop);
//! assert_eq!(game.current_pot_total(), Chips::new(6));
//!
//! game.call().unwrap();
//! game.check().unwrap();
//! assert_eq!(game.stage(), Stage::Flop);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod game;
pub mod player;
pub mod poker;
pub mod seats;
mod showdown;

pub use error::{ActionError, ActionErrorKind, GameError};
pub use game::Game;
pub use player::Player;
pub use poker::{Card, Chips, HandRanker, Preset, Stage, StandardRanker, Turn};
pub use seats::SeatSet;
