//! Command-line interface for the arcade.

use arcade_hub::GameKind;
use arcade_tictactoe::{Mark, SearchPolicy};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arcade - tic-tac-toe, rock-paper-scissors and dice in the terminal
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Terminal mini-games with an unbeatable tic-tac-toe opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults are used if it is missing)
    #[arg(short, long, global = true, default_value = "arcade.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Which game to play
        #[arg(short, long, value_enum, default_value_t = GameKind::TicTacToe)]
        game: GameKind,
    },

    /// Score every move on a board and print the computer's choice
    Hint {
        /// Board as nine squares, e.g. "XX./OO./..." (X, O, and . for empty)
        board: String,

        /// Side to move
        #[arg(short, long, value_enum, default_value_t = Side::O)]
        mark: Side,
    },

    /// Let the computer play itself and print the final position
    SelfPlay {
        /// Leaf scoring policy (overrides the config file)
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,
    },
}

/// Side to move, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Crosses
    X,
    /// Noughts
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

/// Search policy, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Prefer faster wins and slower losses
    DepthShaped,
    /// Every win and loss is worth the same
    Flat,
}

impl From<PolicyArg> for SearchPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::DepthShaped => SearchPolicy::DepthShaped,
            PolicyArg::Flat => SearchPolicy::Flat,
        }
    }
}
