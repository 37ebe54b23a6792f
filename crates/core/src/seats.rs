// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Ordered sets of seats.
use serde::{Deserialize, Serialize};

/// An ordered set of seat indices at a table with a fixed number of seats.
///
/// Seats are iterated in ascending order and the set is treated as a cycle
/// when moving around the table, see [SeatSet::next].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSet {
    members: Vec<bool>,
}

impl SeatSet {
    /// Creates an empty set for a table with `seats` seats.
    pub fn new(seats: usize) -> Self {
        Self {
            members: vec![false; seats],
        }
    }

    /// Creates a set with the seats for which `f` returns true.
    pub fn from_fn(seats: usize, f: impl Fn(usize) -> bool) -> Self {
        Self {
            members: (0..seats).map(f).collect(),
        }
    }

    /// Adds a seat to the set.
    pub fn insert(&mut self, seat: usize) {
        if let Some(m) = self.members.get_mut(seat) {
            *m = true;
        }
    }

    /// Removes a seat from the set.
    pub fn remove(&mut self, seat: usize) {
        if let Some(m) = self.members.get_mut(seat) {
            *m = false;
        }
    }

    /// Checks if a seat is in the set.
    pub fn contains(&self, seat: usize) -> bool {
        self.members.get(seat).copied().unwrap_or(false)
    }

    /// Number of seats in the set.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|m| **m).count()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|m| *m)
    }

    /// The lowest seat in the set.
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }

    /// Iterates the seats in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(seat, m)| m.then_some(seat))
    }

    /// Returns the seat reached moving `steps` seats forward from `current`.
    ///
    /// Each step lands on the lowest seat in the set greater than the current
    /// seat, wrapping to the lowest seat in the set. The `current` seat doesn't
    /// need to be in the set, `steps` is taken modulo the set size so that moving
    /// a full cycle, or zero steps, returns `current`.
    ///
    /// Returns `None` if the set is empty.
    pub fn next(&self, current: usize, steps: usize) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let mut seat = current;
        for _ in 0..steps % len {
            seat = self
                .iter()
                .find(|&s| s > seat)
                .or_else(|| self.first())?;
        }

        Some(seat)
    }

    /// Checks if moving from seat `from` to seat `to` around the table reaches
    /// or goes past `seat`.
    ///
    /// Moving to the same seat is a full cycle that passes every seat.
    pub fn passes(from: usize, to: usize, seat: usize) -> bool {
        if from < to {
            from < seat && seat <= to
        } else {
            seat > from || seat <= to
        }
    }
}

impl FromIterator<usize> for SeatSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut members = Vec::new();
        for seat in iter {
            if seat >= members.len() {
                members.resize(seat + 1, false);
            }
            members[seat] = true;
        }
        Self { members }
    }
}
