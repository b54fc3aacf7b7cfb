//! Pure dice-guess game rules.
//!
//! The player picks a face, rolls one die, and wins coins when the guess
//! hits. The bank never goes negative.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod face;
mod table;

pub use face::{Face, FaceError};
pub use table::{
    DiceTable, HISTORY_LEN, MISS_COST, NO_GUESS_COST, PAYOUT_MULTIPLIER, RollOutcome,
    RollResult, STARTING_COINS, WIN_BASE,
};
