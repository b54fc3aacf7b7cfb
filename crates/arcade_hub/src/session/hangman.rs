//! Hangman session.

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_hangman::{GuessOutcome, Hangman, HangmanError, HangmanStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Response to an accepted guess.
#[derive(Debug, Clone, PartialEq)]
pub struct HangmanResponse {
    /// What the guess revealed.
    pub guess: GuessOutcome,
    /// Puzzle status after the guess.
    pub status: HangmanStatus,
    /// Reward claim made when the guess solved the word.
    pub reward: RewardOutcome,
}

/// Hangman puzzles drawn from the word list.
pub struct HangmanSession {
    puzzle: Hangman,
    rng: StdRng,
    notifier: Arc<dyn RewardNotifier>,
}

impl HangmanSession {
    /// Creates a session seeded from the operating system.
    pub fn new(notifier: Arc<dyn RewardNotifier>) -> Self {
        Self::with_rng(notifier, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(notifier: Arc<dyn RewardNotifier>, mut rng: StdRng) -> Self {
        Self {
            puzzle: Hangman::random(&mut rng),
            rng,
            notifier,
        }
    }

    /// The current puzzle.
    pub fn puzzle(&self) -> &Hangman {
        &self.puzzle
    }

    /// Guesses a letter. Solving the word claims a reward.
    ///
    /// Rejected guesses leave the puzzle unchanged.
    #[instrument(skip(self), fields(masked = %self.puzzle.masked()))]
    pub async fn guess(&mut self, letter: char) -> Result<HangmanResponse, HangmanError> {
        let guess = self.puzzle.guess(letter).inspect_err(|e| {
            warn!(error = %e, "Guess ignored");
        })?;

        let status = self.puzzle.status();
        let reward = if status == HangmanStatus::Won {
            Some(claim_reward(self.notifier.as_ref(), GameKind::Hangman).await)
        } else {
            None
        };
        Ok(HangmanResponse {
            guess,
            status,
            reward,
        })
    }

    /// Draws a new word.
    pub fn reset(&mut self) {
        info!("Starting a new hangman word");
        self.puzzle.reset(&mut self.rng);
    }
}
