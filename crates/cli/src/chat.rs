// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Chat commands front end.
//!
//! Players challenge each other in the channel, once a challenge is accepted
//! the duel runs until one of the players has all the chips.
use ahash::AHashMap;
use anyhow::{ensure, Result};
use log::{debug, info};
use rand::prelude::*;

use duel_core::{Chips, Game, GameError, Stage};

/// The channel topic when no duel is running.
pub const DEFAULT_TOPIC: &str = "Welcome! To challenge someone, type !challenge playernick";

/// A message sent back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A message to everyone in the channel.
    Channel(String),
    /// A private message to a player.
    Notice {
        /// The player nickname.
        nick: String,
        /// The message text.
        text: String,
    },
    /// A new channel topic.
    Topic(String),
}

impl Output {
    /// Renders this output as a chat protocol line.
    pub fn render(&self, channel: &str) -> String {
        match self {
            Output::Channel(text) => format!("PRIVMSG {channel} :{text}"),
            Output::Notice { nick, text } => format!("NOTICE {nick} :{text}"),
            Output::Topic(text) => format!("TOPIC {channel} :{text}"),
        }
    }
}

/// Settings for each duel.
#[derive(Debug, Clone, Copy)]
pub struct DuelConfig {
    /// The starting stack for each player.
    pub chips: Chips,
    /// The small blind.
    pub small_blind: Chips,
}

/// The channel state, open challenges and the running duel.
#[derive(Debug)]
pub struct Lobby {
    config: DuelConfig,
    /// Challenger to opponent, lowercase nicks.
    challenges: AHashMap<String, String>,
    duel: Option<Duel>,
    rng: StdRng,
}

impl Lobby {
    /// Creates a lobby, each duel game is seeded from `rng`.
    pub fn new(config: DuelConfig, rng: StdRng) -> Result<Self> {
        ensure!(config.chips > Chips::ZERO, "starting chips must be positive");
        ensure!(config.small_blind > Chips::ZERO, "small blind must be positive");

        Ok(Self {
            config,
            challenges: AHashMap::default(),
            duel: None,
            rng,
        })
    }

    /// Checks if a duel is running.
    pub fn in_duel(&self) -> bool {
        self.duel.is_some()
    }

    /// Handles a chat message from `nick`.
    pub fn handle(&mut self, nick: &str, message: &str) -> Result<Vec<Output>> {
        let nick = nick.to_lowercase();
        let mut words = message.split_whitespace();
        let Some(cmd) = words.next() else {
            return Ok(Vec::new());
        };
        let arg = words.next();

        let Some(duel) = self.duel.as_mut() else {
            return self.lobby_command(&nick, cmd, arg);
        };

        let mut output = duel.command(&nick, cmd, arg)?;
        if let Some(winner) = duel.winner() {
            info!("Duel won by {winner}");
            output.push(Output::Channel(format!("{winner} wins!")));
            output.push(Output::Topic(DEFAULT_TOPIC.to_string()));
            self.duel = None;
            self.challenges.clear();
        }

        Ok(output)
    }

    fn lobby_command(&mut self, nick: &str, cmd: &str, arg: Option<&str>) -> Result<Vec<Output>> {
        let Some(other) = arg.map(str::to_lowercase) else {
            return Ok(Vec::new());
        };

        if other == nick {
            return Ok(Vec::new());
        }

        let challenged = self.challenges.get(&other).is_some_and(|o| o == nick);
        match cmd {
            "!challenge" if challenged => {
                let mut output = vec![Output::Channel(
                    "That player has already challenged you! Starting the duel now...".into(),
                )];
                output.extend(self.begin_duel(&other, nick)?);
                Ok(output)
            }
            "!challenge" => {
                debug!("{nick} challenges {other}");
                self.challenges.insert(nick.to_string(), other);
                Ok(vec![Output::Channel(format!(
                    "Your opponent should type \"!accept {nick}\" to start the duel."
                ))])
            }
            "!accept" if challenged => {
                let mut output = vec![Output::Channel("Let the games begin! May the best win.".into())];
                output.extend(self.begin_duel(&other, nick)?);
                Ok(output)
            }
            _ => Ok(Vec::new()),
        }
    }

    fn begin_duel(&mut self, challenger: &str, opponent: &str) -> Result<Vec<Output>> {
        info!("Starting duel {challenger} vs {opponent}");

        let rng = StdRng::from_rng(&mut self.rng);
        let stacks = [self.config.chips; 2];
        let mut game = Game::with_rng(&stacks, self.config.small_blind, rng)?;
        game.new_hand(None)?;

        let mut duel = Duel {
            game,
            nicks: vec![challenger.to_string(), opponent.to_string()],
            last_update: None,
            last_all_show: false,
        };

        let output = duel.update();
        self.duel = Some(duel);
        Ok(output)
    }
}

/// A running duel.
#[derive(Debug)]
struct Duel {
    game: Game,
    nicks: Vec<String>,
    /// The hand number and stage at the last update.
    last_update: Option<(usize, Stage)>,
    last_all_show: bool,
}

impl Duel {
    fn seat_of(&self, nick: &str) -> Option<usize> {
        self.nicks.iter().position(|n| n == nick)
    }

    fn command(&mut self, nick: &str, cmd: &str, arg: Option<&str>) -> Result<Vec<Output>> {
        let Some(seat) = self.seat_of(nick) else {
            return Ok(Vec::new());
        };

        let in_hand = self.game.players_in_hand().contains(seat);
        match cmd {
            "!advance" if in_hand => {
                let result = self.game.advance();
                return self.respond(nick, result);
            }
            "!hand" if self.game.alive_players().contains(seat) => {
                return Ok(self.hand_notice(seat).into_iter().collect());
            }
            "!reveal" if in_hand && self.game.stage() == Stage::Showdown => {
                return Ok(self.reveal(&[seat]).into_iter().collect());
            }
            _ => {}
        }

        // Only the player on turn can bet.
        if seat != self.game.get_current_turn().seat {
            return Ok(Vec::new());
        }

        let amount = arg.and_then(|a| a.parse::<u32>().ok()).map(Chips::new);
        let result = match (cmd, amount) {
            ("!check", _) => self.game.check(),
            ("!fold", _) => self.game.fold(),
            ("!call", _) => self.game.call(),
            ("!allin", _) => self.game.all_in(),
            ("!bet", Some(amount)) => self.game.bet(amount),
            ("!raiseby", Some(amount)) => self.game.raise_by(amount),
            ("!raiseto", Some(amount)) => self.game.raise_to(amount),
            _ => return Ok(Vec::new()),
        };

        debug!("{nick} {cmd} {}", arg.unwrap_or_default());
        self.respond(nick, result.map_err(GameError::from))
    }

    fn respond(&mut self, nick: &str, result: Result<(), GameError>) -> Result<Vec<Output>> {
        match result {
            Ok(()) => Ok(self.update()),
            Err(GameError::Action(e)) => Ok(vec![Output::Channel(format!("{nick}: {e}"))]),
            Err(e) => Err(e.into()),
        }
    }

    /// The duel winner once only one player has chips.
    fn winner(&self) -> Option<String> {
        if self.game.stage() != Stage::Showdown {
            return None;
        }

        let mut with_chips = self
            .game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_chips())
            .map(|(seat, _)| seat);
        match (with_chips.next(), with_chips.next()) {
            (Some(seat), None) => Some(self.nicks[seat].clone()),
            _ => None,
        }
    }

    fn hand(&self, seat: usize) -> Option<String> {
        let (c1, c2) = self.game.player(seat)?.hand?;
        Some(format!("{c1} {c2}"))
    }

    fn hand_notice(&self, seat: usize) -> Option<Output> {
        self.hand(seat).map(|hand| Output::Notice {
            nick: self.nicks[seat].clone(),
            text: format!("Your hand is {hand}."),
        })
    }

    fn reveal(&self, seats: &[usize]) -> Option<Output> {
        let hands = seats
            .iter()
            .filter_map(|&seat| {
                self.hand(seat)
                    .map(|hand| format!("{}'s hand: {hand}", self.nicks[seat]))
            })
            .collect::<Vec<_>>();

        (!hands.is_empty()).then(|| Output::Channel(hands.join(", ")))
    }

    fn board(&self) -> String {
        self.game
            .board()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the game changes after a successful command.
    fn update(&mut self) -> Vec<Output> {
        let mut output = Vec::new();
        let turn = self.game.get_current_turn();
        let hand_no = self.game.hands_played();

        if self.last_update.map(|(h, _)| h) != Some(hand_no) {
            for seat in self.game.alive_players().iter() {
                output.extend(self.hand_notice(seat));
            }
        }

        if self.last_update != Some((hand_no, turn.stage)) {
            self.last_update = Some((hand_no, turn.stage));

            match turn.stage {
                Stage::Preflop => {}
                Stage::Flop | Stage::Turn | Stage::River => {
                    output.push(Output::Channel(format!("Community cards: {}", self.board())));
                }
                Stage::Showdown => {
                    output.extend(self.reveal(self.game.players_to_reveal()));

                    let winnings = self
                        .game
                        .winnings()
                        .iter()
                        .map(|(seat, chips)| format!("{} wins {chips} chips", self.nicks[*seat]))
                        .collect::<Vec<_>>();
                    output.push(Output::Channel(winnings.join(", ")));
                    output.push(Output::Channel(
                        "If your hand was not shown, you may !reveal your cards. \
                         Otherwise, advance to the next hand with !advance."
                            .into(),
                    ));

                    self.last_all_show = false;
                }
            }
        }

        if turn.stage != Stage::Showdown {
            if turn.all_show {
                if !self.last_all_show {
                    let in_hand = self.game.players_in_hand().iter().collect::<Vec<_>>();
                    output.extend(self.reveal(&in_hand));
                    self.last_all_show = true;
                }

                output.push(Output::Channel(
                    "Anyone in this hand may type !advance to continue".into(),
                ));
            } else {
                let message = if turn.table_bet == Chips::ZERO {
                    "You may !check, !bet ##, or !fold.".to_string()
                } else if turn.table_bet == turn.committed {
                    format!(
                        "You have already placed {} chips. You may !check or !raiseto ##.",
                        turn.committed
                    )
                } else {
                    format!(
                        "The bet is {} and you have committed {} chips. \
                         You may !call, !raiseto ##, or !fold.",
                        turn.table_bet, turn.committed
                    )
                };

                output.push(Output::Channel(format!(
                    "{}: It is your turn. {message}",
                    self.nicks[turn.seat]
                )));
            }
        }

        if self.winner().is_none() {
            output.push(Output::Topic(self.topic()));
        }

        output
    }

    /// The channel topic with the game status.
    fn topic(&self) -> String {
        let turn = self.game.get_current_turn();
        let players = self
            .game
            .alive_players()
            .iter()
            .map(|seat| {
                let on_turn = seat == turn.seat && turn.stage != Stage::Showdown;
                format!(
                    "{}{}{}{} ({})",
                    if on_turn { "*" } else { "" },
                    if self.game.players_in_hand().contains(seat) { "+" } else { "" },
                    if self.game.button() == Some(seat) { "@" } else { "" },
                    self.nicks[seat],
                    self.game.players()[seat].chips,
                )
            })
            .collect::<Vec<_>>();

        let status = format!(
            "{} | Pot: {} chips | Community cards: {}",
            players.join(", "),
            self.game.current_pot_total(),
            self.board()
        );
        status.trim_end().to_string()
    }
}
