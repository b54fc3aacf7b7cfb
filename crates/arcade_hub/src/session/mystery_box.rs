//! Mystery-box session.

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_mystery_box::{BoxError, BoxGrid, OpenOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Response to an opened box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxResponse {
    /// What was inside.
    pub outcome: OpenOutcome,
    /// Reward claim made when the last safe box was opened.
    pub reward: RewardOutcome,
}

/// Mystery-box games with a random bomb.
pub struct MysteryBoxSession {
    grid: BoxGrid,
    rng: StdRng,
    notifier: Arc<dyn RewardNotifier>,
}

impl MysteryBoxSession {
    /// Creates a session seeded from the operating system.
    pub fn new(notifier: Arc<dyn RewardNotifier>) -> Self {
        Self::with_rng(notifier, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(notifier: Arc<dyn RewardNotifier>, mut rng: StdRng) -> Self {
        Self {
            grid: BoxGrid::random(&mut rng),
            rng,
            notifier,
        }
    }

    /// The current grid.
    pub fn grid(&self) -> &BoxGrid {
        &self.grid
    }

    /// Opens a box (0-based). Opening the last safe box claims a reward.
    #[instrument(skip(self), fields(remaining = self.grid.remaining_safe()))]
    pub async fn open(&mut self, index: usize) -> Result<BoxResponse, BoxError> {
        let outcome = self.grid.open(index).inspect_err(|e| {
            warn!(error = %e, "Open ignored");
        })?;

        let reward = if outcome == OpenOutcome::Cleared {
            Some(claim_reward(self.notifier.as_ref(), GameKind::MysteryBox).await)
        } else {
            None
        };
        Ok(BoxResponse { outcome, reward })
    }

    /// Hides a new bomb and closes every box.
    pub fn reset(&mut self) {
        info!("Resetting mystery box");
        self.grid.reset(&mut self.rng);
    }
}
