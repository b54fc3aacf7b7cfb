//! Human player fed by lines of terminal input.

use super::{Player, PlayerAction};
use anyhow::Result;
use arcade_tictactoe::{Game, Position};
use tokio::sync::mpsc;
use tracing::debug;

/// Human player reading typed commands.
///
/// Accepts `1`-`9` (the numbers printed on empty squares), a position
/// label such as `center`, `r`/`restart`, and `q`/`quit`.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

/// Parses one line of input, `None` if it means nothing.
pub fn parse_action(line: &str) -> Option<PlayerAction> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(PlayerAction::Quit),
        "r" | "restart" | "reset" => return Some(PlayerAction::Restart),
        _ => {}
    }

    if let Ok(num) = line.parse::<usize>() {
        return (1..=9).contains(&num).then(|| PlayerAction::Place(num - 1));
    }
    Position::from_label_or_number(line).map(|pos| PlayerAction::Place(pos.to_index()))
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _game: &Game) -> Result<PlayerAction> {
        while let Some(line) = self.input_rx.recv().await {
            match parse_action(&line) {
                Some(action) => return Ok(action),
                None => debug!(input = %line, "Unrecognised input"),
            }
        }

        // Input closed (end of stdin) means the player left.
        Ok(PlayerAction::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
