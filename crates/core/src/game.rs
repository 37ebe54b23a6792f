// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand lifecycle state machine.
//!
//! A [Game] holds the players ledger for a duel and runs each hand from the
//! blinds to the showdown. Betting actions always act on the seat whose turn it
//! is, the caller must only forward actions from that seat.
use ahash::AHashMap;
use log::{debug, info};
use rand::prelude::*;

use crate::{
    error::{ActionError, ActionErrorKind, GameError},
    player::Player,
    poker::{Card, Chips, Deck, HandRanker, Preset, Stage, StandardRanker, Turn},
    seats::SeatSet,
    showdown,
};

/// A poker duel between two or more seats.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    alive_players: SeatSet,
    players_in_hand: SeatSet,
    button: Option<usize>,
    community: [Option<Card>; 5],
    stage: Stage,
    current_bet: Chips,
    minimum_raise: Chips,
    player_turn: usize,
    last_raise_player: usize,
    all_show: bool,
    winnings: AHashMap<usize, Chips>,
    players_to_reveal: Vec<usize>,
    small_blind: Chips,
    hands_played: usize,
    deck: Deck,
    rng: StdRng,
    ranker: Box<dyn HandRanker>,
}

impl Game {
    /// The maximum number of seats that can be dealt from one deck.
    pub const MAX_SEATS: usize = 23;

    /// Creates a game with the given stacks, one per seat.
    pub fn new(stacks: &[Chips], small_blind: Chips) -> Result<Self, GameError> {
        Self::with_rng(stacks, small_blind, StdRng::from_os_rng())
    }

    /// Creates a game that shuffles and awards odd chips using `rng`.
    pub fn with_rng(stacks: &[Chips], small_blind: Chips, rng: StdRng) -> Result<Self, GameError> {
        if stacks.is_empty() {
            return Err(GameError::NoSeats);
        }

        if stacks.len() > Self::MAX_SEATS {
            return Err(GameError::TooManySeats(stacks.len()));
        }

        if small_blind == Chips::ZERO {
            return Err(GameError::InvalidSmallBlind);
        }

        let seats = stacks.len();
        Ok(Self {
            players: stacks.iter().map(|&c| Player::new(c)).collect(),
            alive_players: SeatSet::new(seats),
            players_in_hand: SeatSet::new(seats),
            button: None,
            community: [None; 5],
            stage: Stage::Showdown,
            current_bet: Chips::ZERO,
            minimum_raise: small_blind * 2,
            player_turn: 0,
            last_raise_player: 0,
            all_show: false,
            winnings: AHashMap::default(),
            players_to_reveal: Vec::new(),
            small_blind,
            hands_played: 0,
            deck: Deck::default(),
            rng,
            ranker: Box::new(StandardRanker),
        })
    }

    /// Replaces the hand ranker used at showdown.
    pub fn with_ranker(mut self, ranker: Box<dyn HandRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Starts a new hand.
    ///
    /// Deals from a shuffled deck, or from the preset cards followed by the
    /// rest of a shuffled deck. Fails with [GameError::DuelOver] if fewer than
    /// two players have chips, the game is left unchanged.
    pub fn new_hand(&mut self, preset: Option<Preset>) -> Result<(), GameError> {
        let alive = SeatSet::from_fn(self.players.len(), |s| self.players[s].has_chips());
        if alive.len() < 2 {
            return Err(GameError::DuelOver);
        }

        let button = match self.button {
            Some(b) => alive.next(b, 1),
            None => alive.first(),
        }
        .ok_or(GameError::DuelOver)?;

        self.alive_players = alive.clone();
        self.players_in_hand = alive;
        self.button = Some(button);
        self.community = [None; 5];
        self.winnings.clear();
        self.players_to_reveal.clear();
        self.all_show = false;
        self.hands_played += 1;

        self.deck = match preset {
            Some(preset) => Deck::stacked(&preset.cards(), &mut self.rng),
            None => Deck::new_and_shuffled(&mut self.rng),
        };

        for player in &mut self.players {
            player.clear_bets();
            player.hand = None;
        }

        // Deal two cards at a time starting after the button.
        let mut seat = button;
        loop {
            seat = self.next_alive(seat, 1);
            let c1 = self.deck.deal();
            let c2 = self.deck.deal();
            self.players[seat].hand = Some((c1, c2));
            if seat == button {
                break;
            }
        }

        // Heads up the button posts the small blind and acts first.
        let sb_offset = if self.alive_players.len() > 2 { 1 } else { 0 };
        let sb_seat = self.next_alive(button, sb_offset);
        let bb_seat = self.next_alive(button, sb_offset + 1);
        let big_blind = self.big_blind();
        self.players[sb_seat].transfer_to_pot(self.small_blind);
        self.players[bb_seat].transfer_to_pot(big_blind);

        self.stage = Stage::Preflop;
        self.current_bet = big_blind;
        self.minimum_raise = big_blind;
        self.last_raise_player = self.next_alive(button, sb_offset + 2);
        self.player_turn = self.last_raise_player;

        info!(
            "Hand {} button {button} small blind {sb_seat} big blind {bb_seat} players {:?}",
            self.hands_played,
            self.alive_players.iter().collect::<Vec<_>>()
        );

        if !self.players[self.player_turn].has_chips() {
            self.rotate();
        }

        Ok(())
    }

    /// Returns the seat whose action is awaited and the betting state.
    pub fn get_current_turn(&self) -> Turn {
        Turn {
            seat: self.player_turn,
            committed: self
                .players
                .get(self.player_turn)
                .map(|p| p.current_bet)
                .unwrap_or_default(),
            table_bet: self.current_bet,
            stage: self.stage,
            all_show: self.all_show,
        }
    }

    /// The chips committed to the pot by the players in this hand.
    pub fn current_pot_total(&self) -> Chips {
        self.alive_players
            .iter()
            .map(|s| self.players[s].committed())
            .sum()
    }

    /// Checks, passing the action to the next player.
    pub fn check(&mut self) -> Result<(), ActionError> {
        self.betting_allowed()?;

        if self.current_bet > self.players[self.player_turn].current_bet {
            return Err(self.error(ActionErrorKind::MustRespondToBet));
        }

        debug!("Seat {} checks", self.player_turn);
        self.rotate();
        Ok(())
    }

    /// Folds, the player leaves the hand.
    pub fn fold(&mut self) -> Result<(), ActionError> {
        self.betting_allowed()?;

        debug!("Seat {} folds", self.player_turn);
        self.players_in_hand.remove(self.player_turn);
        self.rotate();
        Ok(())
    }

    /// Opens the betting round with a bet of `amount` chips.
    pub fn bet(&mut self, amount: Chips) -> Result<(), ActionError> {
        self.betting_allowed()?;

        let chips = self.players[self.player_turn].chips;
        if self.current_bet != Chips::ZERO {
            return Err(self.error(ActionErrorKind::MustRespondToBet));
        }

        if amount > chips {
            return Err(self.error(ActionErrorKind::NotEnoughChips));
        }

        if amount < self.big_blind() && amount != chips {
            return Err(self.error(ActionErrorKind::BetTooSmall {
                minimum: self.big_blind(),
            }));
        }

        debug!("Seat {} bets {amount}", self.player_turn);
        self.players[self.player_turn].transfer_to_pot(amount);
        self.minimum_raise = amount;
        self.current_bet = amount;
        self.last_raise_player = self.player_turn;
        self.rotate();
        Ok(())
    }

    /// Matches the table bet, or goes all-in if the player is short.
    pub fn call(&mut self) -> Result<(), ActionError> {
        self.betting_allowed()?;

        let player = &self.players[self.player_turn];
        if self.current_bet == player.current_bet {
            return Err(self.error(ActionErrorKind::NoBetToCall));
        }

        let deficit = self.current_bet - player.current_bet;
        let paid = self.players[self.player_turn].transfer_to_pot(deficit);
        debug!("Seat {} calls {paid}", self.player_turn);
        self.rotate();
        Ok(())
    }

    /// Raises the table bet by `amount` chips.
    pub fn raise_by(&mut self, amount: Chips) -> Result<(), ActionError> {
        self.betting_allowed()?;

        let player = &self.players[self.player_turn];
        let outflow = self.current_bet + amount - player.current_bet;
        if outflow > player.chips {
            return Err(self.error(ActionErrorKind::NotEnoughChips));
        }

        if amount < self.minimum_raise && outflow != player.chips {
            return Err(self.error(ActionErrorKind::RaiseTooSmall {
                minimum: self.minimum_raise,
            }));
        }

        if amount == Chips::ZERO {
            return Err(self.error(ActionErrorKind::InvalidAmount));
        }

        debug!("Seat {} raises by {amount}", self.player_turn);
        self.players[self.player_turn].transfer_to_pot(outflow);
        self.minimum_raise = amount;
        self.current_bet += amount;
        self.last_raise_player = self.player_turn;
        self.rotate();
        Ok(())
    }

    /// Raises the table bet to `amount` chips.
    pub fn raise_to(&mut self, amount: Chips) -> Result<(), ActionError> {
        if amount >= self.current_bet {
            return self.raise_by(amount - self.current_bet);
        }

        self.betting_allowed()?;

        // A target below the table bet is a negative raise, it fails with the
        // same checks raise_by applies.
        let player = &self.players[self.player_turn];
        let kind = if amount < player.current_bet {
            ActionErrorKind::RaiseTooSmall {
                minimum: self.minimum_raise,
            }
        } else if amount - player.current_bet > player.chips {
            ActionErrorKind::NotEnoughChips
        } else if amount - player.current_bet == player.chips {
            ActionErrorKind::InvalidAmount
        } else {
            ActionErrorKind::RaiseTooSmall {
                minimum: self.minimum_raise,
            }
        };

        Err(self.error(kind))
    }

    /// Puts every chip left in the pot.
    pub fn all_in(&mut self) -> Result<(), ActionError> {
        self.betting_allowed()?;

        let player = &self.players[self.player_turn];
        let chips = player.chips;
        if self.current_bet == Chips::ZERO {
            self.bet(chips)
        } else {
            self.raise_to(chips + player.current_bet)
        }
    }

    /// Starts the next hand after a showdown, or deals the next street when
    /// no more betting is possible.
    pub fn advance(&mut self) -> Result<(), GameError> {
        if self.stage == Stage::Showdown {
            self.new_hand(None)
        } else if self.all_show {
            debug!("Advance from {}", self.stage);
            self.rotate();
            Ok(())
        } else if self.current_bet == Chips::ZERO {
            Err(self.error(ActionErrorKind::MustBetOrCheck).into())
        } else {
            Err(self.error(ActionErrorKind::MustRespondToBet).into())
        }
    }

    /// The players ledger indexed by seat.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A seat ledger.
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// The number of seats at the table.
    pub fn seats(&self) -> usize {
        self.players.len()
    }

    /// The seats that had chips at the start of the hand.
    pub fn alive_players(&self) -> &SeatSet {
        &self.alive_players
    }

    /// The seats that have not folded in this hand.
    pub fn players_in_hand(&self) -> &SeatSet {
        &self.players_in_hand
    }

    /// The community cards slots.
    pub fn community(&self) -> &[Option<Card>; 5] {
        &self.community
    }

    /// The dealt community cards.
    pub fn board(&self) -> Vec<Card> {
        self.community.iter().flatten().copied().collect()
    }

    /// The button seat, none before the first hand.
    pub fn button(&self) -> Option<usize> {
        self.button
    }

    /// The chips won by each seat in the last showdown in seat order.
    pub fn winnings(&self) -> Vec<(usize, Chips)> {
        let mut winnings = self
            .winnings
            .iter()
            .filter(|(_, c)| **c > Chips::ZERO)
            .map(|(s, c)| (*s, *c))
            .collect::<Vec<_>>();
        winnings.sort_unstable();
        winnings
    }

    /// The seats that must show their cards in reveal order.
    pub fn players_to_reveal(&self) -> &[usize] {
        &self.players_to_reveal
    }

    /// The hand stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The minimum raise for this round.
    pub fn minimum_raise(&self) -> Chips {
        self.minimum_raise
    }

    /// The small blind.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The big blind, also the minimum bet.
    pub fn big_blind(&self) -> Chips {
        self.small_blind * 2
    }

    /// Number of hands started.
    pub fn hands_played(&self) -> usize {
        self.hands_played
    }

    /// Checks if the hand runs to showdown without betting.
    pub fn is_all_show(&self) -> bool {
        self.all_show
    }

    /// The seat that closes the betting round.
    pub fn last_raise_player(&self) -> usize {
        self.last_raise_player
    }

    fn error(&self, kind: ActionErrorKind) -> ActionError {
        ActionError::new(self.player_turn, kind)
    }

    fn betting_allowed(&self) -> Result<(), ActionError> {
        if self.all_show || self.stage == Stage::Showdown {
            Err(self.error(ActionErrorKind::NoActionAllowed))
        } else {
            Ok(())
        }
    }

    fn next_alive(&self, seat: usize, steps: usize) -> usize {
        self.alive_players.next(seat, steps).unwrap_or(seat)
    }

    /// Moves the turn to the next player in hand, closing the round when the
    /// turn reaches or goes past the last raiser.
    fn rotate(&mut self) {
        loop {
            let prev = self.player_turn;
            let next = self.players_in_hand.next(prev, 1).unwrap_or(prev);
            self.player_turn = next;

            let no_contest = self.players_in_hand.len() < 2;
            if no_contest || self.all_show || SeatSet::passes(prev, next, self.last_raise_player) {
                self.close_round(no_contest);
                return;
            }

            // Skip players that are all-in.
            if self.players[next].has_chips() {
                return;
            }
        }
    }

    fn close_round(&mut self, no_contest: bool) {
        for player in &mut self.players {
            player.next_stage();
        }

        self.stage = if no_contest {
            Stage::Showdown
        } else {
            self.stage.next()
        };
        self.current_bet = Chips::ZERO;
        self.minimum_raise = self.big_blind();

        let button = self.button.unwrap_or_default();
        if !no_contest && !self.all_show && self.stage != Stage::Showdown {
            let with_chips = self
                .players_in_hand
                .iter()
                .filter(|&s| self.players[s].has_chips())
                .collect::<SeatSet>();
            match with_chips.next(button, 1) {
                Some(seat) if with_chips.len() >= 2 => {
                    self.last_raise_player = seat;
                    self.player_turn = seat;
                }
                _ => {
                    info!("All players in hand show their cards");
                    self.all_show = true;
                }
            }
        }

        if self.all_show {
            self.player_turn = self.players_in_hand.next(button, 1).unwrap_or(button);
        }

        match self.stage {
            Stage::Showdown => self.showdown(no_contest),
            Stage::Preflop => {}
            stage => self.deal_community(stage.board_cards()),
        }
    }

    fn deal_community(&mut self, count: usize) {
        for slot in self.community[..count].iter_mut().filter(|c| c.is_none()) {
            *slot = Some(self.deck.deal());
        }

        info!("Stage {} board {:?}", self.stage, self.board());
    }

    fn showdown(&mut self, no_contest: bool) {
        let tiers = if no_contest {
            vec![self.players_in_hand.iter().collect()]
        } else {
            let board = <[Card; 5]>::try_from(self.board().as_slice()).ok();
            let ranks = self
                .players_in_hand
                .iter()
                .map(|seat| {
                    let rank = match (self.players[seat].hand, board) {
                        (Some((c1, c2)), Some([b1, b2, b3, b4, b5])) => {
                            self.ranker.rank_of_seven(&[c1, c2, b1, b2, b3, b4, b5])
                        }
                        _ => 0,
                    };
                    (seat, rank)
                })
                .collect::<Vec<_>>();
            showdown::rank_tiers(&ranks)
        };

        let contributions = self
            .alive_players
            .iter()
            .map(|s| (s, self.players[s].committed()))
            .collect::<Vec<_>>();
        let pots = showdown::side_pots(&contributions);
        self.winnings = showdown::distribute(&pots, &tiers, &mut self.rng);

        for (&seat, &chips) in &self.winnings {
            self.players[seat].chips += chips;
        }

        for player in &mut self.players {
            player.clear_bets();
        }

        self.players_to_reveal = if no_contest {
            Vec::new()
        } else {
            let winners = self.winnings().into_iter().map(|(s, _)| s).collect::<Vec<_>>();
            showdown::reveal_order(&self.players_in_hand, self.last_raise_player, &winners)
        };

        info!(
            "Hand {} winnings {:?} reveal {:?}",
            self.hands_played,
            self.winnings(),
            self.players_to_reveal
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(stacks: &[u32], small_blind: u32) -> Game {
        let stacks = stacks.iter().map(|&c| Chips::new(c)).collect::<Vec<_>>();
        Game::with_rng(&stacks, Chips::new(small_blind), StdRng::seed_from_u64(13)).unwrap()
    }

    fn chips(game: &Game) -> Vec<u32> {
        game.players().iter().map(|p| p.chips.amount()).collect()
    }

    fn pot(game: &Game) -> u32 {
        game.current_pot_total().amount()
    }

    fn total_chips(game: &Game) -> u32 {
        game.players()
            .iter()
            .map(|p| (p.chips + p.committed()).amount())
            .sum()
    }

    fn preset(hole_cards: &[(&str, &str)], board: &[&str]) -> Option<Preset> {
        Some(Preset::parse(hole_cards, board).unwrap())
    }

    #[test]
    fn setup_errors() {
        let sb = Chips::new(2);
        assert_eq!(Game::new(&[], sb).unwrap_err(), GameError::NoSeats);
        assert_eq!(
            Game::new(&[Chips::new(10); 24], sb).unwrap_err(),
            GameError::TooManySeats(24)
        );
        assert_eq!(
            Game::new(&[Chips::new(10); 2], Chips::ZERO).unwrap_err(),
            GameError::InvalidSmallBlind
        );

        let mut game = new_game(&[10, 0], 2);
        assert_eq!(game.new_hand(None), Err(GameError::DuelOver));
        assert_eq!(game.hands_played(), 0);
        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(chips(&game), [10, 0]);
    }

    #[test]
    fn heads_up_split_then_double_up() {
        let mut game = new_game(&[6, 34], 2);

        game.new_hand(preset(
            &[("9C", "4H"), ("9H", "4S")],
            &["9D", "10S", "2D", "6S", "AC"],
        ))
        .unwrap();
        assert_eq!(game.button(), Some(0));
        assert_eq!(chips(&game), [4, 30]);
        assert_eq!(pot(&game), 6);
        assert_eq!(game.get_current_turn().seat, 0);

        game.call().unwrap();
        assert_eq!(chips(&game), [2, 30]);
        assert_eq!(pot(&game), 8);

        game.check().unwrap();
        assert_eq!(game.stage(), Stage::Flop);
        assert_eq!(game.board().len(), 3);

        game.bet(Chips::new(4)).unwrap();
        game.call().unwrap();
        assert_eq!(chips(&game), [0, 26]);
        assert_eq!(pot(&game), 14);
        assert!(game.is_all_show());
        assert_eq!(game.stage(), Stage::Turn);

        // No more betting.
        let err = game.check().unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NoActionAllowed);

        game.advance().unwrap();
        game.advance().unwrap();
        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(chips(&game), [6, 34]);
        assert_eq!(pot(&game), 0);
        assert_eq!(
            game.winnings(),
            vec![(0, Chips::new(6)), (1, Chips::new(8))]
        );

        // Second hand, button moves to seat 1.
        game.new_hand(preset(
            &[("8H", "9D"), ("AS", "AH")],
            &["JH", "2D", "7S", "6C", "10S"],
        ))
        .unwrap();
        assert_eq!(game.button(), Some(1));
        assert_eq!(chips(&game), [2, 32]);
        assert_eq!(game.get_current_turn().seat, 1);

        game.raise_by(Chips::new(4)).unwrap();
        game.call().unwrap();
        assert_eq!(chips(&game), [0, 26]);
        assert_eq!(pot(&game), 14);
        assert!(game.is_all_show());

        game.advance().unwrap();
        game.advance().unwrap();
        game.advance().unwrap();
        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(chips(&game), [12, 28]);
        assert_eq!(pot(&game), 0);
        assert_eq!(game.hands_played(), 2);
    }

    #[test]
    fn three_players_blinds() {
        let mut game = new_game(&[100, 100, 100], 5);
        game.new_hand(None).unwrap();

        // Button 0, small blind 1, big blind 2, first to act 0.
        assert_eq!(game.button(), Some(0));
        assert_eq!(chips(&game), [100, 95, 90]);
        assert_eq!(game.get_current_turn().seat, 0);
        assert_eq!(game.last_raise_player(), 0);
        assert_eq!(game.minimum_raise(), Chips::new(10));

        for p in game.players() {
            assert!(p.hand.is_some());
        }

        // Everyone calls and the big blind checks its option.
        game.call().unwrap();
        game.call().unwrap();
        assert_eq!(game.stage(), Stage::Preflop);
        assert_eq!(game.get_current_turn().seat, 2);
        game.check().unwrap();

        assert_eq!(game.stage(), Stage::Flop);
        assert_eq!(pot(&game), 30);

        // First to act after the flop is the seat after the button.
        assert_eq!(game.get_current_turn().seat, 1);
        assert_eq!(game.last_raise_player(), 1);

        // Next hand moves the button.
        game.fold().unwrap();
        game.fold().unwrap();
        assert_eq!(game.stage(), Stage::Showdown);
        game.advance().unwrap();
        assert_eq!(game.button(), Some(1));
        assert_eq!(game.get_current_turn().seat, 1);
    }

    #[test]
    fn fold_ends_hand_without_reveal() {
        let mut game = new_game(&[50, 50, 50], 1);
        game.new_hand(None).unwrap();

        // Seat 0 raises, the blinds fold.
        game.raise_by(Chips::new(4)).unwrap();
        game.fold().unwrap();
        game.fold().unwrap();

        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(game.players_in_hand().iter().collect::<Vec<_>>(), [0]);
        assert!(game.players_to_reveal().is_empty());
        assert_eq!(chips(&game), [53, 49, 48]);
        assert_eq!(total_chips(&game), 150);
        assert!(game.board().is_empty());
    }

    #[test]
    fn folded_last_raiser_closes_round() {
        let mut game = new_game(&[50, 50, 50], 1);
        game.new_hand(None).unwrap();

        // First actor is also the last raise boundary.
        assert_eq!(game.last_raise_player(), 0);
        game.fold().unwrap();
        game.call().unwrap();
        game.check().unwrap();

        assert_eq!(game.stage(), Stage::Flop);
        assert_eq!(game.get_current_turn().seat, 1);
    }

    #[test]
    fn action_errors() {
        let mut game = new_game(&[30, 30], 2);
        game.new_hand(None).unwrap();
        let seat = game.get_current_turn().seat;

        let err = game.check().unwrap_err();
        assert_eq!(err, ActionError::new(seat, ActionErrorKind::MustRespondToBet));

        let err = game.bet(Chips::new(4)).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::MustRespondToBet);

        let err = game.raise_by(Chips::new(40)).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NotEnoughChips);

        let err = game.raise_by(Chips::new(2)).unwrap_err();
        assert_eq!(
            err.kind,
            ActionErrorKind::RaiseTooSmall {
                minimum: Chips::new(4)
            }
        );

        let err = game.advance().unwrap_err();
        assert_eq!(err, GameError::Action(ActionError::new(seat, ActionErrorKind::MustRespondToBet)));

        // Errors leave the state untouched.
        assert_eq!(chips(&game), [28, 26]);
        assert_eq!(game.get_current_turn().seat, seat);

        game.call().unwrap();
        let err = game.call().unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NoBetToCall);
        game.check().unwrap();

        // Flop, no bet yet.
        assert_eq!(game.stage(), Stage::Flop);
        let err = game.call().unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NoBetToCall);

        let err = game.bet(Chips::new(3)).unwrap_err();
        assert_eq!(
            err.kind,
            ActionErrorKind::BetTooSmall {
                minimum: Chips::new(4)
            }
        );

        let err = game.bet(Chips::new(27)).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NotEnoughChips);

        let err = game.advance().unwrap_err();
        assert_eq!(
            err,
            GameError::Action(ActionError::new(
                game.get_current_turn().seat,
                ActionErrorKind::MustBetOrCheck
            ))
        );

        // Seat 1 goes all-in, a zero raise that would put seat 0 all-in.
        game.all_in().unwrap();
        assert_eq!(game.get_current_turn().table_bet, Chips::new(26));
        let err = game.raise_to(Chips::new(26)).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::InvalidAmount);
        assert_eq!(err.to_string(), "That is an invalid amount of chips.");
    }

    #[test]
    fn actions_before_first_hand() {
        let mut game = new_game(&[30, 30], 2);
        assert_eq!(game.check().unwrap_err().kind, ActionErrorKind::NoActionAllowed);
        assert_eq!(game.fold().unwrap_err().kind, ActionErrorKind::NoActionAllowed);

        // Advance from the initial state starts the first hand.
        game.advance().unwrap();
        assert_eq!(game.stage(), Stage::Preflop);
        assert_eq!(game.hands_played(), 1);
    }

    #[test]
    fn raise_to_matches_raise_by() {
        for (table_bet, amount) in [(4, 10), (4, 8), (4, 30)] {
            let mut by = new_game(&[30, 30], 2);
            let mut to = new_game(&[30, 30], 2);
            by.new_hand(None).unwrap();
            to.new_hand(None).unwrap();
            assert_eq!(by.get_current_turn().table_bet, Chips::new(table_bet));

            let r1 = by.raise_by(Chips::new(amount - table_bet));
            let r2 = to.raise_to(Chips::new(amount));
            assert_eq!(r1, r2);
            assert_eq!(chips(&by), chips(&to));
            assert_eq!(by.get_current_turn(), to.get_current_turn());
            assert_eq!(by.minimum_raise(), to.minimum_raise());
        }
    }

    #[test]
    fn short_all_in_is_rejected() {
        let mut game = new_game(&[40, 10], 2);
        game.new_hand(None).unwrap();

        // Seat 0 raises over the seat 1 stack.
        game.raise_to(Chips::new(20)).unwrap();
        assert_eq!(game.get_current_turn().seat, 1);
        assert_eq!(chips(&game), [20, 6]);

        // All-in for less than the table bet is a negative raise.
        let err = game.all_in().unwrap_err();
        assert_eq!(err, ActionError::new(1, ActionErrorKind::InvalidAmount));
        assert_eq!(game.raise_to(Chips::new(10)), Err(err));

        let too_small = ActionErrorKind::RaiseTooSmall {
            minimum: Chips::new(16),
        };
        assert_eq!(game.raise_to(Chips::new(12)).unwrap_err().kind, ActionErrorKind::NotEnoughChips);
        assert_eq!(game.raise_to(Chips::new(6)).unwrap_err().kind, too_small);
        assert_eq!(game.raise_to(Chips::new(2)).unwrap_err().kind, too_small);
        assert_eq!(chips(&game), [20, 6]);

        // The short stack calls for what it has left.
        game.call().unwrap();
        assert_eq!(chips(&game), [20, 0]);
        assert!(game.is_all_show());

        while game.stage() != Stage::Showdown {
            game.advance().unwrap();
        }

        // The uncalled chips go back to seat 0.
        assert_eq!(total_chips(&game), 50);
        assert!(game.winnings().iter().any(|(s, c)| *s == 0 && *c >= Chips::new(10)));
    }

    #[test]
    fn all_in_opens_betting() {
        let mut game = new_game(&[30, 30], 2);
        game.new_hand(None).unwrap();
        game.call().unwrap();
        game.check().unwrap();

        let seat = game.get_current_turn().seat;
        game.all_in().unwrap();
        assert_eq!(game.players()[seat].chips, Chips::ZERO);
        assert_eq!(game.get_current_turn().table_bet, Chips::new(26));

        game.call().unwrap();
        assert!(game.is_all_show());
        assert_eq!(pot(&game), 60);
    }

    #[test]
    fn short_blind_skips_turn() {
        // The button posts its whole stack as small blind.
        let mut game = new_game(&[2, 30], 2);
        game.new_hand(None).unwrap();
        assert_eq!(chips(&game), [0, 26]);
        assert_eq!(game.get_current_turn().seat, 1);

        game.check().unwrap();
        assert!(game.is_all_show());

        while game.stage() != Stage::Showdown {
            game.advance().unwrap();
        }
        assert_eq!(total_chips(&game), 32);
    }

    #[test]
    fn side_pots_multiway() {
        let mut game = new_game(&[10, 30, 50], 1);
        game.new_hand(preset(
            &[("AS", "AH"), ("KS", "KH"), ("2C", "7D")],
            &["AD", "KD", "3C", "8S", "9H"],
        ))
        .unwrap();

        // Button 0 deals first to seat 1, then 2, then 0.
        assert_eq!(game.players()[1].hand.map(|h| h.0.to_string()), Some("AS".into()));
        assert_eq!(game.players()[0].hand.map(|h| h.0.to_string()), Some("2C".into()));

        game.all_in().unwrap();
        game.all_in().unwrap();
        game.all_in().unwrap();
        assert!(game.is_all_show());
        assert_eq!(pot(&game), 90);

        while game.stage() != Stage::Showdown {
            game.advance().unwrap();
        }

        // Seat 1 aces wins the main and the side pot, seat 2 kings get back
        // the uncalled chips.
        assert_eq!(chips(&game), [0, 70, 20]);
        assert_eq!(game.winnings(), vec![(1, Chips::new(70)), (2, Chips::new(20))]);
        assert_eq!(game.alive_players().len(), 3);

        game.advance().unwrap();
        assert_eq!(game.alive_players().iter().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn duel_over() {
        let mut game = new_game(&[10, 10], 1);
        game.new_hand(preset(
            &[("AS", "AH"), ("7C", "2D")],
            &["AD", "KD", "3C", "8S", "9H"],
        ))
        .unwrap();

        game.all_in().unwrap();
        game.call().unwrap();
        while game.stage() != Stage::Showdown {
            game.advance().unwrap();
        }

        assert_eq!(chips(&game), [0, 20]);
        assert_eq!(game.advance(), Err(GameError::DuelOver));
        assert_eq!(game.stage(), Stage::Showdown);
    }

    #[test]
    fn random_play_keeps_chips() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = new_game(&[40, 25, 60, 15], 1);
        let total = total_chips(&game);

        for _ in 0..2_000 {
            if game.stage() == Stage::Showdown {
                assert_eq!(pot(&game), 0);
                if game.advance().is_err() {
                    break;
                }
                continue;
            }

            assert_eq!(total_chips(&game), total);

            if game.is_all_show() {
                game.advance().unwrap();
                continue;
            }

            let turn = game.get_current_turn();
            assert!(game.players()[turn.seat].has_chips());
            assert!(game.players_in_hand().contains(turn.seat));

            let _ = match rng.random_range(0..6) {
                0 => game.fold(),
                1 => game.check(),
                2 => game.call(),
                3 => game.bet(Chips::new(rng.random_range(1..10))),
                4 => game.raise_by(Chips::new(rng.random_range(1..10))),
                _ => game.all_in(),
            };
        }

        assert_eq!(total_chips(&game), total);
    }

    #[derive(Debug)]
    struct LowSeatWins;

    impl HandRanker for LowSeatWins {
        fn rank_of_seven(&self, cards: &[Card; 7]) -> u32 {
            // The preset gives seat 0 the ace of spades.
            if cards[0].to_string() == "AS" { 1 } else { 0 }
        }
    }

    #[test]
    fn custom_ranker() {
        let mut game = new_game(&[20, 20], 1).with_ranker(Box::new(LowSeatWins));
        game.new_hand(preset(&[("KC", "2D"), ("AS", "3H")], &[])).unwrap();
        assert_eq!(game.players()[0].hand.map(|h| h.0.to_string()), Some("AS".into()));

        game.all_in().unwrap();
        game.call().unwrap();
        while game.stage() != Stage::Showdown {
            game.advance().unwrap();
        }

        assert_eq!(chips(&game), [40, 0]);
        assert_eq!(game.players_to_reveal(), [0]);
    }
}
