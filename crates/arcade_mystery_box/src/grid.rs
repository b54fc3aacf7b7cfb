//! The box grid and its win/lose rule.

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Boxes on the grid.
pub const TOTAL_BOXES: usize = 25;
/// Boxes per row.
pub const GRID_COLS: usize = 5;
/// Boxes without the bomb.
pub const SAFE_BOXES: usize = TOTAL_BOXES - 1;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum BoxStatus {
    /// Safe boxes remain closed.
    #[display("Find all safe boxes!")]
    Playing,
    /// Every safe box is open.
    #[display("You opened all 24 safe boxes!")]
    Won,
    /// The bomb was opened.
    #[display("Boom! You hit the bomb.")]
    Lost,
}

/// Result of an accepted open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenOutcome {
    /// A safe box; play continues.
    Safe {
        /// Safe boxes still closed.
        remaining: usize,
    },
    /// The last safe box; the game is won.
    Cleared,
    /// The bomb; the game is lost.
    Bomb,
}

/// A rejected open. Rejection never changes the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoxError {
    /// Index outside the grid.
    #[display("Box {} does not exist", _0)]
    OutOfBounds(usize),
    /// The box is already open.
    #[display("Box {} is already open", _0)]
    AlreadyOpen(usize),
    /// The game is finished.
    #[display("Game is over: {}", _0)]
    GameOver(BoxStatus),
}

impl std::error::Error for BoxError {}

/// Twenty-five boxes, one bomb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxGrid {
    bomb: usize,
    opened: [bool; TOTAL_BOXES],
    status: BoxStatus,
}

impl BoxGrid {
    /// Hides the bomb in a uniformly random box.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::closed(rng.random_range(0..TOTAL_BOXES))
    }

    /// Hides the bomb at `bomb`.
    pub fn with_bomb(bomb: usize) -> Result<Self, BoxError> {
        if bomb >= TOTAL_BOXES {
            return Err(BoxError::OutOfBounds(bomb));
        }
        Ok(Self::closed(bomb))
    }

    fn closed(bomb: usize) -> Self {
        Self {
            bomb,
            opened: [false; TOTAL_BOXES],
            status: BoxStatus::Playing,
        }
    }

    /// Current status.
    pub fn status(&self) -> BoxStatus {
        self.status
    }

    /// Whether the box at `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.opened.get(index).copied().unwrap_or(false)
    }

    /// Safe boxes still closed.
    pub fn remaining_safe(&self) -> usize {
        let opened_safe = self
            .opened
            .iter()
            .enumerate()
            .filter(|&(i, &open)| open && i != self.bomb)
            .count();
        SAFE_BOXES - opened_safe
    }

    /// Opens the box at `index` (0-based).
    #[instrument(level = "debug", skip(self), fields(status = %self.status))]
    pub fn open(&mut self, index: usize) -> Result<OpenOutcome, BoxError> {
        if self.status != BoxStatus::Playing {
            return Err(BoxError::GameOver(self.status));
        }
        if index >= TOTAL_BOXES {
            return Err(BoxError::OutOfBounds(index));
        }
        if self.opened[index] {
            return Err(BoxError::AlreadyOpen(index));
        }

        self.opened[index] = true;
        let outcome = if index == self.bomb {
            self.status = BoxStatus::Lost;
            OpenOutcome::Bomb
        } else {
            match self.remaining_safe() {
                0 => {
                    self.status = BoxStatus::Won;
                    OpenOutcome::Cleared
                }
                remaining => OpenOutcome::Safe { remaining },
            }
        };
        debug!(?outcome, "Box opened");
        Ok(outcome)
    }

    /// Five rows of five. Closed boxes show their 1-based number, open
    /// safe boxes `*`, and the bomb `X` once the game is over.
    pub fn display(&self) -> String {
        (0..TOTAL_BOXES)
            .map(|i| {
                let exposed = self.opened[i] || self.status != BoxStatus::Playing;
                let cell = if i == self.bomb && exposed {
                    " X".to_string()
                } else if self.opened[i] {
                    " *".to_string()
                } else {
                    format!("{:>2}", i + 1)
                };
                if i % GRID_COLS == GRID_COLS - 1 && i + 1 < TOTAL_BOXES {
                    format!("{}\n", cell)
                } else if i + 1 < TOTAL_BOXES {
                    format!("{} ", cell)
                } else {
                    cell
                }
            })
            .collect()
    }

    /// Re-hides the bomb and closes every box.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::random(rng);
    }
}
