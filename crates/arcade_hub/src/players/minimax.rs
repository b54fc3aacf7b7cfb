//! Computer player backed by the minimax search.

use super::{Player, PlayerAction};
use crate::config::AiConfig;
use anyhow::Result;
use arcade_tictactoe::{Game, Minimax};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::debug;

/// Simulated thinking time before a computer move is committed.
///
/// Purely cosmetic: the move is chosen before the delay starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThinkDelay {
    min: Duration,
    jitter: Duration,
}

impl ThinkDelay {
    /// Creates a delay of `min` plus up to `jitter`.
    pub fn new(min: Duration, jitter: Duration) -> Self {
        Self { min, jitter }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Draws one delay.
    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let extra = if jitter_ms == 0 {
            0
        } else {
            rng.random_range(0..jitter_ms)
        };
        self.min + Duration::from_millis(extra)
    }
}

impl From<&AiConfig> for ThinkDelay {
    fn from(config: &AiConfig) -> Self {
        Self::new(config.think_min(), config.think_jitter())
    }
}

/// Computer player choosing moves by exhaustive search.
pub struct MinimaxPlayer {
    name: String,
    engine: Minimax,
    delay: ThinkDelay,
    rng: StdRng,
}

impl MinimaxPlayer {
    /// Creates a computer player.
    pub fn new(name: impl Into<String>, engine: Minimax, delay: ThinkDelay) -> Self {
        Self {
            name: name.into(),
            engine,
            delay,
            rng: StdRng::from_os_rng(),
        }
    }
}

#[async_trait::async_trait]
impl Player for MinimaxPlayer {
    async fn get_move(&mut self, game: &Game) -> Result<PlayerAction> {
        let Some(mark) = game.to_move() else {
            anyhow::bail!("No move to make: game is over");
        };

        // Decide first; the delay cannot change the choice.
        let position = self
            .engine
            .best_move_for(game.board(), mark)
            .ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(ai = %self.name, %position, "AI chose position");

        let pause = self.delay.sample(&mut self.rng);
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        Ok(PlayerAction::Place(position.to_index()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
