//! The games offered by the hub.

use serde::{Deserialize, Serialize};

/// A game in the hub.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    /// Tic-tac-toe against the minimax opponent.
    TicTacToe,
    /// Rock-paper-scissors against a random hand.
    Rps,
    /// Guess the face of a die.
    Dice,
    /// Guess a word letter by letter.
    Hangman,
    /// Find the eight pairs.
    Memory,
    /// Open every box but the bomb.
    MysteryBox,
}

impl GameKind {
    /// Title shown in the terminal.
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::Rps => "Rock • Paper • Scissors",
            GameKind::Dice => "Dice Roll",
            GameKind::Hangman => "Hangman",
            GameKind::Memory => "Memory Match",
            GameKind::MysteryBox => "Mystery Box",
        }
    }
}
