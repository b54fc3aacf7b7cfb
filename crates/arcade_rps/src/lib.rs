//! Pure rock-paper-scissors rules.
//!
//! The computer picks uniformly at random; rules take the random source
//! as a parameter so callers and tests control it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod choice;
mod scoreboard;

pub use choice::{Choice, Round, RoundResult, judge, play_round};
pub use scoreboard::Scoreboard;
