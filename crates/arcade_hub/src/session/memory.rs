//! Memory-match session.

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_memory::{FlipOutcome, MemoryBoard, MemoryError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Response to an accepted flip.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryResponse {
    /// What the flip turned up.
    pub flip: FlipOutcome,
    /// True once every pair is matched.
    pub cleared: bool,
    /// Reward claim made when the flip cleared the board.
    pub reward: RewardOutcome,
}

/// Memory-match games on shuffled boards.
pub struct MemorySession {
    board: MemoryBoard,
    rng: StdRng,
    notifier: Arc<dyn RewardNotifier>,
}

impl MemorySession {
    /// Creates a session seeded from the operating system.
    pub fn new(notifier: Arc<dyn RewardNotifier>) -> Self {
        Self::with_rng(notifier, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(notifier: Arc<dyn RewardNotifier>, mut rng: StdRng) -> Self {
        Self {
            board: MemoryBoard::shuffled(&mut rng),
            rng,
            notifier,
        }
    }

    /// The current board.
    pub fn board(&self) -> &MemoryBoard {
        &self.board
    }

    /// Turns a card (0-based). Clearing the board claims a reward.
    #[instrument(skip(self), fields(moves = self.board.moves()))]
    pub async fn flip(&mut self, index: usize) -> Result<MemoryResponse, MemoryError> {
        let flip = self.board.flip(index).inspect_err(|e| {
            warn!(error = %e, "Flip ignored");
        })?;

        let cleared = self.board.is_cleared();
        let reward = if cleared {
            info!(moves = self.board.moves(), "Board cleared");
            Some(claim_reward(self.notifier.as_ref(), GameKind::Memory).await)
        } else {
            None
        };
        Ok(MemoryResponse {
            flip,
            cleared,
            reward,
        })
    }

    /// Deals a fresh board.
    pub fn reset(&mut self) {
        info!("Dealing a new memory board");
        self.board.reset(&mut self.rng);
    }
}
