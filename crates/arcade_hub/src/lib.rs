//! Terminal mini-game hub.
//!
//! Tic-tac-toe against an unbeatable minimax opponent, plus
//! rock-paper-scissors, dice, hangman, memory match and mystery box. Human
//! wins are reported through a [`RewardNotifier`].
//!
//! # Architecture
//!
//! - **Sessions**: own the game values and claim rewards ([`session`])
//! - **Players**: human and computer turn-takers ([`players`])
//! - **Orchestrator**: drives a tic-tac-toe game between two players
//! - **Terminal**: line-based input and output ([`terminal`])
//!
//! # Example
//!
//! ```no_run
//! use arcade_hub::{HubConfig, TicTacToeSession, TracingNotifier};
//! use arcade_tictactoe::Minimax;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = HubConfig::load("arcade.toml")?;
//! let notifier = Arc::new(TracingNotifier::new(config.reward().clone()));
//! let mut session = TicTacToeSession::new(Minimax::default(), notifier);
//! session.handle_player_move(0).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod kind;
mod orchestrator;
mod reward;

pub mod players;
pub mod session;
pub mod terminal;

pub use config::{AiConfig, ConfigError, DiceConfig, HubConfig, RECIPIENT_ENV, RewardConfig};
pub use kind::GameKind;
pub use orchestrator::{GameEvent, Orchestrator};
pub use reward::{
    RewardClaim, RewardError, RewardNotifier, RewardReceipt, TracingNotifier, claim_reward,
};
pub use session::{
    BoxResponse, DiceResponse, DiceSession, HangmanResponse, HangmanSession, MemoryResponse,
    MemorySession, MoveResponse, MysteryBoxSession, RewardOutcome, RpsResponse, RpsSession,
    Status, TicTacToeSession,
};
