//! Bank, streaks and roll history.

use super::Face;
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Coins in a fresh bank.
pub const STARTING_COINS: u32 = 100;
/// Payout multiplier for a correct single-face guess.
pub const PAYOUT_MULTIPLIER: u32 = 5;
/// Base amount multiplied by the payout on a hit.
pub const WIN_BASE: u32 = 10;
/// Coins lost on a wrong guess.
pub const MISS_COST: u32 = 10;
/// Coins lost when rolling without a guess.
pub const NO_GUESS_COST: u32 = 2;
/// Number of recent rolls kept.
pub const HISTORY_LEN: usize = 10;

/// What a roll did to the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// The guess matched; coins were added.
    Hit {
        /// Coins won.
        won: u32,
    },
    /// The guess missed; coins were taken (never below zero).
    Miss {
        /// Coins actually deducted.
        lost: u32,
    },
    /// No guess was set; a small fee was taken.
    NoGuess {
        /// Coins actually deducted.
        lost: u32,
    },
}

impl RollOutcome {
    /// True when the guess matched.
    pub fn is_hit(&self) -> bool {
        matches!(self, RollOutcome::Hit { .. })
    }
}

/// A resolved roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The face rolled.
    pub face: Face,
    /// Effect on the bank.
    pub outcome: RollOutcome,
}

/// Player state for the dice-guess game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DiceTable {
    /// Bank after the last roll.
    coins: u32,
    /// Consecutive hits.
    streak: u32,
    /// Longest streak since the last reset.
    best_streak: u32,
    /// Current guess, if any.
    guess: Option<Face>,
    /// Most recent rolls, newest first.
    history: VecDeque<Face>,
    /// Bank restored by [`DiceTable::reset`].
    starting_coins: u32,
}

impl DiceTable {
    /// Creates a table with the given starting bank.
    pub fn new(starting_coins: u32) -> Self {
        Self {
            coins: starting_coins,
            streak: 0,
            best_streak: 0,
            guess: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
            starting_coins,
        }
    }

    /// Sets or clears the guess.
    pub fn set_guess(&mut self, guess: Option<Face>) {
        self.guess = guess;
    }

    /// Coins a hit pays with a guess set.
    pub fn payout(&self) -> u32 {
        if self.guess.is_some() {
            PAYOUT_MULTIPLIER * WIN_BASE
        } else {
            0
        }
    }

    /// Rolls the die and settles the bank.
    pub fn roll(&mut self, rng: &mut impl Rng) -> RollResult {
        self.settle(Face::roll(rng))
    }

    /// Settles the bank against a known face.
    #[instrument(level = "debug", skip(self), fields(guess = ?self.guess, coins = self.coins))]
    pub fn settle(&mut self, face: Face) -> RollResult {
        self.history.push_front(face);
        self.history.truncate(HISTORY_LEN);

        let outcome = match self.guess {
            Some(guess) if guess == face => {
                let won = self.payout();
                self.coins = self.coins.saturating_add(won);
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
                RollOutcome::Hit { won }
            }
            Some(_) => {
                let lost = self.deduct(MISS_COST);
                RollOutcome::Miss { lost }
            }
            None => {
                let lost = self.deduct(NO_GUESS_COST);
                RollOutcome::NoGuess { lost }
            }
        };

        debug!(%face, ?outcome, coins = self.coins, "Roll settled");
        RollResult { face, outcome }
    }

    fn deduct(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.coins);
        self.coins -= lost;
        self.streak = 0;
        lost
    }

    /// Restores the starting bank and clears streaks, guess and history.
    pub fn reset(&mut self) {
        *self = Self::new(self.starting_coins);
    }
}

impl Default for DiceTable {
    fn default() -> Self {
        Self::new(STARTING_COINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(n: u8) -> Face {
        Face::new(n).unwrap()
    }

    #[test]
    fn test_hit_pays_and_extends_streak() {
        let mut table = DiceTable::default();
        table.set_guess(Some(face(4)));
        let result = table.settle(face(4));
        assert_eq!(result.outcome, RollOutcome::Hit { won: 50 });
        assert_eq!(*table.coins(), 150);
        table.settle(face(4));
        assert_eq!(*table.streak(), 2);
        assert_eq!(*table.best_streak(), 2);
    }

    #[test]
    fn test_miss_costs_and_resets_streak() {
        let mut table = DiceTable::default();
        table.set_guess(Some(face(2)));
        table.settle(face(2));
        let result = table.settle(face(5));
        assert_eq!(result.outcome, RollOutcome::Miss { lost: 10 });
        assert_eq!(*table.coins(), 140);
        assert_eq!(*table.streak(), 0);
        assert_eq!(*table.best_streak(), 1);
    }

    #[test]
    fn test_no_guess_fee() {
        let mut table = DiceTable::default();
        let result = table.settle(face(1));
        assert_eq!(result.outcome, RollOutcome::NoGuess { lost: 2 });
        assert_eq!(*table.coins(), 98);
    }

    #[test]
    fn test_bank_never_negative() {
        let mut table = DiceTable::new(5);
        table.set_guess(Some(face(6)));
        let result = table.settle(face(1));
        assert_eq!(result.outcome, RollOutcome::Miss { lost: 5 });
        assert_eq!(*table.coins(), 0);
        table.settle(face(1));
        assert_eq!(*table.coins(), 0);
    }

    #[test]
    fn test_history_keeps_newest_ten() {
        let mut table = DiceTable::default();
        for n in 0..12u8 {
            table.settle(face(n % 6 + 1));
        }
        assert_eq!(table.history().len(), HISTORY_LEN);
        // Newest roll first.
        assert_eq!(table.history().front().copied(), Some(face(11 % 6 + 1)));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut table = DiceTable::new(30);
        table.set_guess(Some(face(3)));
        table.settle(face(3));
        table.reset();
        assert_eq!(table, DiceTable::new(30));
    }
}
