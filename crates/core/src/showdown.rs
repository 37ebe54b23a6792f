// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pots resolution at the end of a hand.
use ahash::AHashMap;
use log::debug;
use rand::prelude::*;

use crate::{poker::Chips, seats::SeatSet};

/// A pot and the seats that contest it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    /// Seats that contributed at least this pot level, in seat order.
    pub contenders: Vec<usize>,
    /// The chips in this pot.
    pub chips: Chips,
}

/// Splits the players contributions into pots.
///
/// Each distinct contribution level closes a pot with the level increase
/// times the number of seats that contributed at least that level.
pub fn side_pots(contributions: &[(usize, Chips)]) -> Vec<SidePot> {
    let mut sorted = contributions.to_vec();
    sorted.sort_by_key(|&(seat, chips)| (chips, seat));

    let mut pots = Vec::new();
    let mut floor = Chips::ZERO;
    for (idx, &(_, level)) in sorted.iter().enumerate() {
        if level > floor {
            let mut contenders = sorted[idx..].iter().map(|(s, _)| *s).collect::<Vec<_>>();
            contenders.sort_unstable();

            let chips = (level - floor) * contenders.len() as u32;
            pots.push(SidePot { contenders, chips });
            floor = level;
        }
    }

    pots
}

/// Groups seats by rank, the best rank first and equal ranks in the same tier.
pub fn rank_tiers(ranks: &[(usize, u32)]) -> Vec<Vec<usize>> {
    let mut sorted = ranks.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut tiers: Vec<(u32, Vec<usize>)> = Vec::new();
    for (seat, rank) in sorted {
        match tiers.last_mut() {
            Some((r, tier)) if *r == rank => tier.push(seat),
            _ => tiers.push((rank, vec![seat])),
        }
    }

    tiers.into_iter().map(|(_, tier)| tier).collect()
}

/// Awards each pot to the best tier with a seat among the pot contenders.
///
/// The pot is split evenly and the division remainder goes to one of the
/// winners picked at random. A pot that none of the tiers contests is
/// returned to its contenders with the same rule.
pub fn distribute<R: Rng>(
    pots: &[SidePot],
    tiers: &[Vec<usize>],
    rng: &mut R,
) -> AHashMap<usize, Chips> {
    let mut winnings = AHashMap::default();

    for pot in pots {
        let winners = tiers
            .iter()
            .map(|tier| {
                tier.iter()
                    .copied()
                    .filter(|s| pot.contenders.contains(s))
                    .collect::<Vec<_>>()
            })
            .find(|w| !w.is_empty())
            .unwrap_or_else(|| pot.contenders.clone());

        if winners.is_empty() {
            continue;
        }

        let count = winners.len() as u32;
        let split = pot.chips / count;
        let remainder = pot.chips % count;

        for seat in &winners {
            *winnings.entry(*seat).or_insert(Chips::ZERO) += split;
        }

        if remainder > Chips::ZERO {
            if let Some(seat) = winners.choose(rng) {
                *winnings.entry(*seat).or_insert(Chips::ZERO) += remainder;
            }
        }

        debug!("Pot {} to {winners:?} contenders {:?}", pot.chips, pot.contenders);
    }

    winnings
}

/// Computes the seats that must show their cards.
///
/// Walks the seats in hand from `start`, or from the next seat in hand if
/// `start` folded, and stops when every winner in hand has been visited.
pub fn reveal_order(in_hand: &SeatSet, start: usize, winners: &[usize]) -> Vec<usize> {
    let mut pending = winners
        .iter()
        .copied()
        .filter(|s| in_hand.contains(*s))
        .collect::<Vec<_>>();

    let mut order = Vec::new();
    let mut seat = if in_hand.contains(start) {
        start
    } else {
        match in_hand.next(start, 1) {
            Some(seat) => seat,
            None => return order,
        }
    };

    while !pending.is_empty() {
        order.push(seat);
        pending.retain(|s| *s != seat);

        seat = match in_hand.next(seat, 1) {
            Some(next) => next,
            None => break,
        };
    }

    order
}
