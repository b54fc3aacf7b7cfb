//! Player trait and implementations.

mod human;
mod minimax;

pub use human::HumanPlayer;
pub use minimax::{MinimaxPlayer, ThinkDelay};

use anyhow::Result;
use arcade_tictactoe::Game;

/// What a player wants to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Place a mark at the board index (0-8).
    Place(usize),
    /// Abandon this game and start a fresh one.
    Restart,
    /// Leave the game.
    Quit,
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets this player's action for the given snapshot.
    async fn get_move(&mut self, game: &Game) -> Result<PlayerAction>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
