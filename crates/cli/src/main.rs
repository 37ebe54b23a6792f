// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker Duel chat bot.
//!
//! Reads `<nick> <message>` lines from stdin and writes the chat protocol
//! replies to stdout.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use rand::prelude::*;
use std::io::{self, BufRead, Write};

use duel_core::Chips;

pub mod chat;

use chat::{DuelConfig, Lobby, Output, DEFAULT_TOPIC};

#[derive(Debug, Parser)]
struct Cli {
    /// Starting chips for each player.
    #[clap(long, default_value_t = 35)]
    chips: u32,
    /// The small blind, the big blind is twice this amount.
    #[clap(long, default_value_t = 2)]
    small_blind: u32,
    /// Seed for reproducible games.
    #[clap(long)]
    seed: Option<u64>,
    /// The channel name used in replies.
    #[clap(long, short, default_value = "#poker")]
    channel: String,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = DuelConfig {
        chips: Chips::new(cli.chips),
        small_blind: Chips::new(cli.small_blind),
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut lobby = Lobby::new(config, rng)?;
    info!("Joined {} chips {} small blind {}", cli.channel, config.chips, config.small_blind);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", Output::Topic(DEFAULT_TOPIC.to_string()).render(&cli.channel))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some((nick, message)) = line.trim().split_once(' ') else {
            continue;
        };

        match lobby.handle(nick, message) {
            Ok(output) => {
                for out in output {
                    writeln!(stdout, "{}", out.render(&cli.channel))?;
                }
            }
            Err(e) => error!("{e}"),
        }

        stdout.flush()?;
    }

    Ok(())
}
