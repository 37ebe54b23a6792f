// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use crate::poker::Chips;

/// The reason an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionErrorKind {
    /// There is a bet to call, raise, or fold to.
    #[error("You must call, raise, or fold.")]
    MustRespondToBet,
    /// Call without a bet to call.
    #[error("There must be an active bet for you to do that.")]
    NoBetToCall,
    /// The action costs more than the player stack.
    #[error("You do not have enough chips to do that.")]
    NotEnoughChips,
    /// Zero chips raise.
    #[error("That is an invalid amount of chips.")]
    InvalidAmount,
    /// Bet below the big blind without going all-in.
    #[error("The minimum bet is {minimum}.")]
    BetTooSmall {
        /// The minimum bet.
        minimum: Chips,
    },
    /// Raise below the minimum raise without going all-in.
    #[error("You must raise by at least {minimum}, or go all-in.")]
    RaiseTooSmall {
        /// The minimum raise.
        minimum: Chips,
    },
    /// Betting is over for this hand.
    #[error("No action is allowed. You must advance the game.")]
    NoActionAllowed,
    /// Advance while there is no bet.
    #[error("You must bet or check.")]
    MustBetOrCheck,
}

/// A rejected action, the game state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ActionError {
    /// The seat that attempted the action.
    pub seat: usize,
    /// Why the action was rejected.
    pub kind: ActionErrorKind,
}

impl ActionError {
    /// Creates an error for a seat.
    pub fn new(seat: usize, kind: ActionErrorKind) -> Self {
        Self { seat, kind }
    }
}

/// Game setup and hand lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A game needs at least one seat.
    #[error("A game needs at least one seat")]
    NoSeats,
    /// Too many seats to deal from one deck.
    #[error("Too many seats {0}, the maximum is {max}", max = crate::game::Game::MAX_SEATS)]
    TooManySeats(usize),
    /// The small blind must be positive.
    #[error("The small blind must be positive")]
    InvalidSmallBlind,
    /// Fewer than two players have chips.
    #[error("The duel is over")]
    DuelOver,
    /// A rejected player action.
    #[error(transparent)]
    Action(#[from] ActionError),
}
