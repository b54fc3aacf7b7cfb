//! Reward notifier seam.
//!
//! Sessions signal "the human won this game" through a [`RewardNotifier`].
//! The notifier's success or failure is only reported back to the user;
//! it never changes game state.

use crate::GameKind;
use crate::config::RewardConfig;
use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// A request to reward a win. Carries no game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct RewardClaim {
    /// Game that was won.
    game: GameKind,
}

/// Confirmation of an accepted reward.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct RewardReceipt {
    /// Game that was won.
    game: GameKind,
    /// Address the reward goes to.
    recipient: String,
    /// Amount in the smallest unit.
    amount: u64,
}

impl std::fmt::Display for RewardReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} sent to {}", self.amount, self.recipient)
    }
}

/// Reward delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Reward error: {} at {}:{}", message, file, line)]
pub struct RewardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RewardError {
    /// Creates a new reward error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Something that can pay out a win.
#[async_trait]
pub trait RewardNotifier: Send + Sync {
    /// Delivers one reward for `claim`.
    async fn notify(&self, claim: RewardClaim) -> Result<RewardReceipt, RewardError>;
}

/// Notifier that records rewards through structured logging.
///
/// No transfer is signed or submitted; an external payout service can
/// follow the `reward` log target.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    config: RewardConfig,
}

impl TracingNotifier {
    /// Creates a notifier from reward settings.
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RewardNotifier for TracingNotifier {
    #[instrument(skip(self))]
    async fn notify(&self, claim: RewardClaim) -> Result<RewardReceipt, RewardError> {
        if !self.config.enabled() {
            return Err(RewardError::new("Rewards are disabled"));
        }
        let recipient = self
            .config
            .recipient()
            .clone()
            .ok_or_else(|| RewardError::new("No reward recipient configured"))?;

        let amount = *self.config.amount();
        info!(
            target: "reward",
            game = %claim.game(),
            %recipient,
            amount,
            "Reward transfer requested"
        );
        Ok(RewardReceipt::new(*claim.game(), recipient, amount))
    }
}

/// Claims a reward and logs the result.
pub async fn claim_reward(
    notifier: &dyn RewardNotifier,
    game: GameKind,
) -> Result<RewardReceipt, RewardError> {
    let result = notifier.notify(RewardClaim::new(game)).await;
    match &result {
        Ok(receipt) => info!(%game, %receipt, "Reward delivered"),
        Err(e) => warn!(%game, error = %e, "Reward payout failed"),
    }
    result
}
