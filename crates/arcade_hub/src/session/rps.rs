//! Rock-paper-scissors session.

use super::RewardOutcome;
use crate::GameKind;
use crate::reward::{RewardNotifier, claim_reward};
use arcade_rps::{Choice, Round, RoundResult, Scoreboard, play_round};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument};

/// Response to a played round.
#[derive(Debug, Clone, PartialEq)]
pub struct RpsResponse {
    /// The resolved round.
    pub round: Round,
    /// Reward claim made for a winning round.
    pub reward: RewardOutcome,
}

/// Rounds of rock-paper-scissors against a random hand.
pub struct RpsSession {
    scoreboard: Scoreboard,
    rng: StdRng,
    notifier: Arc<dyn RewardNotifier>,
}

impl RpsSession {
    /// Creates a session seeded from the operating system.
    pub fn new(notifier: Arc<dyn RewardNotifier>) -> Self {
        Self::with_rng(notifier, StdRng::from_os_rng())
    }

    /// Creates a session with an explicit random source.
    pub fn with_rng(notifier: Arc<dyn RewardNotifier>, rng: StdRng) -> Self {
        Self {
            scoreboard: Scoreboard::default(),
            rng,
            notifier,
        }
    }

    /// Tally since the last reset.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Plays one round; every winning round claims a reward.
    #[instrument(skip(self))]
    pub async fn play(&mut self, choice: Choice) -> RpsResponse {
        let round = play_round(choice, &mut self.rng);
        self.scoreboard.record(round.result);

        let reward = if round.result == RoundResult::Win {
            Some(claim_reward(self.notifier.as_ref(), GameKind::Rps).await)
        } else {
            None
        };
        RpsResponse { round, reward }
    }

    /// Clears the scoreboard.
    pub fn reset(&mut self) {
        info!("Resetting rock-paper-scissors");
        self.scoreboard.reset();
    }
}
