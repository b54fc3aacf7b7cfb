//! Dice-guess session.

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_dice::{DiceTable, Face, RollResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument};

/// Response to a roll.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceResponse {
    /// The settled roll.
    pub roll: RollResult,
    /// Reward claim made for a hit.
    pub reward: RewardOutcome,
}

/// Dice-guess game with a coin bank.
pub struct DiceSession {
    table: DiceTable,
    rng: StdRng,
    notifier: Arc<dyn RewardNotifier>,
}

impl DiceSession {
    /// Creates a session seeded from the operating system.
    pub fn new(starting_coins: u32, notifier: Arc<dyn RewardNotifier>) -> Self {
        Self::with_rng(starting_coins, notifier, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(starting_coins: u32, notifier: Arc<dyn RewardNotifier>, rng: StdRng) -> Self {
        Self {
            table: DiceTable::new(starting_coins),
            rng,
            notifier,
        }
    }

    /// Bank, streaks, guess and history.
    pub fn table(&self) -> &DiceTable {
        &self.table
    }

    /// Sets or clears the guess for the next roll.
    pub fn set_guess(&mut self, guess: Option<Face>) {
        self.table.set_guess(guess);
    }

    /// Rolls the die; a hit claims a reward.
    #[instrument(skip(self), fields(guess = ?self.table.guess()))]
    pub async fn roll(&mut self) -> DiceResponse {
        let roll = self.table.roll(&mut self.rng);
        self.settled(roll).await
    }

    /// Settles against a known face instead of rolling.
    pub async fn settle(&mut self, face: Face) -> DiceResponse {
        let roll = self.table.settle(face);
        self.settled(roll).await
    }

    async fn settled(&self, roll: RollResult) -> DiceResponse {
        let reward = if roll.outcome.is_hit() {
            Some(claim_reward(self.notifier.as_ref(), GameKind::Dice).await)
        } else {
            None
        };
        DiceResponse { roll, reward }
    }

    /// Restores the starting bank.
    pub fn reset(&mut self) {
        info!("Resetting dice table");
        self.table.reset();
    }
}
