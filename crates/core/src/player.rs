// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};

use crate::poker::{Card, Chips};

/// A seat ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// This player chips.
    pub chips: Chips,
    /// The chips committed in the current betting round.
    pub current_bet: Chips,
    /// The chips committed in the previous rounds of this hand.
    pub past_bets: Chips,
    /// This player hole cards, none if not dealt in.
    pub hand: Option<(Card, Card)>,
}

impl Player {
    /// Creates a new player.
    pub fn new(chips: Chips) -> Self {
        Self {
            chips,
            current_bet: Chips::ZERO,
            past_bets: Chips::ZERO,
            hand: None,
        }
    }

    /// Moves chips from the stack to the current round commitment.
    ///
    /// If the player doesn't have enough chips only the chips left are moved,
    /// returns the amount moved.
    pub fn transfer_to_pot(&mut self, amount: Chips) -> Chips {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.current_bet += amount;
        amount
    }

    /// Folds the current round commitment into the previous rounds bets.
    pub fn next_stage(&mut self) {
        self.past_bets += self.current_bet;
        self.current_bet = Chips::ZERO;
    }

    /// The chips committed to the pot in this hand.
    pub fn committed(&self) -> Chips {
        self.current_bet + self.past_bets
    }

    /// Checks if this player has chips left to bet.
    pub fn has_chips(&self) -> bool {
        self.chips > Chips::ZERO
    }

    /// Clears the hand commitments.
    pub fn clear_bets(&mut self) {
        self.current_bet = Chips::ZERO;
        self.past_bets = Chips::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_caps_at_stack() {
        let mut player = Player::new(Chips::new(10));
        assert_eq!(player.transfer_to_pot(Chips::new(4)), Chips::new(4));
        assert_eq!(player.chips, Chips::new(6));
        assert_eq!(player.current_bet, Chips::new(4));

        assert_eq!(player.transfer_to_pot(Chips::new(20)), Chips::new(6));
        assert_eq!(player.chips, Chips::ZERO);
        assert_eq!(player.current_bet, Chips::new(10));
        assert!(!player.has_chips());
    }

    #[test]
    fn stage_keeps_total() {
        let mut player = Player::new(Chips::new(30));
        player.transfer_to_pot(Chips::new(4));
        player.next_stage();
        player.transfer_to_pot(Chips::new(6));

        assert_eq!(player.past_bets, Chips::new(4));
        assert_eq!(player.current_bet, Chips::new(6));
        assert_eq!(player.committed(), Chips::new(10));
        assert_eq!(player.chips + player.committed(), Chips::new(30));

        player.clear_bets();
        assert_eq!(player.committed(), Chips::ZERO);
    }
}
