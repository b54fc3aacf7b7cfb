//! Running win/lose/draw tally.

use super::RoundResult;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Wins, losses and draws since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by the player.
    win: u32,
    /// Rounds lost by the player.
    lose: u32,
    /// Drawn rounds.
    draw: u32,
}

impl Scoreboard {
    /// Counts one round.
    pub fn record(&mut self, result: RoundResult) {
        match result {
            RoundResult::Win => self.win += 1,
            RoundResult::Lose => self.lose += 1,
            RoundResult::Draw => self.draw += 1,
        }
    }

    /// Total rounds played.
    pub fn rounds(&self) -> u32 {
        self.win + self.lose + self.draw
    }

    /// Clears the tally.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wins {} | Losses {} | Draws {}", self.win, self.lose, self.draw)
    }
}
