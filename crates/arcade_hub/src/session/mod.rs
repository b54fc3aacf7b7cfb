//! Game sessions: the boundary between the presentation layer and the
//! game rules.
//!
//! Sessions own the current game value, reject invalid input without
//! changing state, and claim a reward for each human win.

mod dice;
mod hangman;
mod memory;
mod mystery_box;
mod rps;
mod tictactoe;

pub use dice::{DiceResponse, DiceSession};
pub use hangman::{HangmanResponse, HangmanSession};
pub use memory::{MemoryResponse, MemorySession};
pub use mystery_box::{BoxResponse, MysteryBoxSession};
pub use rps::{RpsResponse, RpsSession};
pub use tictactoe::{MoveResponse, Status, TicTacToeSession};

use crate::reward::{RewardError, RewardReceipt};

/// Result of a reward claim, if one was made.
pub type RewardOutcome = Option<Result<RewardReceipt, RewardError>>;
