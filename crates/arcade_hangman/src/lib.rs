//! Pure hangman rules.
//!
//! A secret word is drawn from a fixed list; the player guesses letters
//! until every letter is revealed or six guesses have missed.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod puzzle;

pub use puzzle::{GuessOutcome, Hangman, HangmanError, HangmanStatus, MAX_MISTAKES, WORDS};
