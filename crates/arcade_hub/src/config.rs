//! Hub configuration loaded from `arcade.toml`.

use arcade_dice::STARTING_COINS;
use arcade_tictactoe::SearchPolicy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the reward recipient.
pub const RECIPIENT_ENV: &str = "ARCADE_REWARD_RECIPIENT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HubConfig {
    /// Reward settings.
    #[serde(default)]
    reward: RewardConfig,

    /// Computer opponent settings.
    #[serde(default)]
    ai: AiConfig,

    /// Dice game settings.
    #[serde(default)]
    dice: DiceConfig,
}

/// Reward notifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Whether wins claim a reward at all.
    #[serde(default = "default_enabled")]
    enabled: bool,

    /// Amount per win in the smallest unit (100000 = 0.001 APT).
    #[serde(default = "default_amount")]
    amount: u64,

    /// Wallet address receiving rewards.
    #[serde(default)]
    recipient: Option<String>,
}

/// Computer opponent settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AiConfig {
    /// Leaf scoring policy for the search.
    #[serde(default)]
    policy: SearchPolicy,

    /// Minimum simulated thinking time in milliseconds.
    #[serde(default = "default_think_min_ms")]
    think_min_ms: u64,

    /// Random extra thinking time in milliseconds, `0..think_jitter_ms`.
    #[serde(default = "default_think_jitter_ms")]
    think_jitter_ms: u64,
}

/// Dice game settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DiceConfig {
    /// Bank at the start and after a reset.
    #[serde(default = "default_starting_coins")]
    starting_coins: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_amount() -> u64 {
    100_000
}

fn default_think_min_ms() -> u64 {
    500
}

fn default_think_jitter_ms() -> u64 {
    400
}

fn default_starting_coins() -> u32 {
    STARTING_COINS
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            amount: default_amount(),
            recipient: None,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            policy: SearchPolicy::default(),
            think_min_ms: default_think_min_ms(),
            think_jitter_ms: default_think_jitter_ms(),
        }
    }
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
        }
    }
}

impl RewardConfig {
    /// Creates reward settings.
    pub fn new(enabled: bool, amount: u64, recipient: Option<String>) -> Self {
        Self {
            enabled,
            amount,
            recipient,
        }
    }
}

impl AiConfig {
    /// Creates opponent settings.
    pub fn new(policy: SearchPolicy, think_min_ms: u64, think_jitter_ms: u64) -> Self {
        Self {
            policy,
            think_min_ms,
            think_jitter_ms,
        }
    }

    /// Minimum thinking delay.
    pub fn think_min(&self) -> Duration {
        Duration::from_millis(self.think_min_ms)
    }

    /// Jitter range added to the minimum.
    pub fn think_jitter(&self) -> Duration {
        Duration::from_millis(self.think_jitter_ms)
    }
}

impl HubConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise, then applies
    /// environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("No config file, using defaults");
            Self::default()
        };

        if let Ok(recipient) = std::env::var(RECIPIENT_ENV) {
            config = config.with_recipient(Some(recipient));
        }
        Ok(config)
    }

    /// Replaces the reward recipient.
    pub fn with_recipient(mut self, recipient: Option<String>) -> Self {
        self.reward.recipient = recipient.filter(|r| !r.trim().is_empty());
        self
    }

    /// Replaces the opponent settings.
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = HubConfig::from_toml_str("").unwrap();
        assert_eq!(config, HubConfig::default());
        assert_eq!(*config.reward().amount(), 100_000);
        assert_eq!(*config.ai().policy(), SearchPolicy::DepthShaped);
        assert_eq!(config.ai().think_min(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_sections() {
        let config = HubConfig::from_toml_str(
            r#"
            [ai]
            policy = "flat"

            [reward]
            recipient = "0xabc"
            "#,
        )
        .unwrap();
        assert_eq!(*config.ai().policy(), SearchPolicy::Flat);
        assert_eq!(*config.ai().think_jitter_ms(), 400);
        assert_eq!(config.reward().recipient().as_deref(), Some("0xabc"));
        assert!(*config.reward().enabled());
    }

    #[test]
    fn test_bad_policy_rejected() {
        let err = HubConfig::from_toml_str("[ai]\npolicy = \"greedy\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_blank_recipient_cleared() {
        let config = HubConfig::default().with_recipient(Some("  ".to_string()));
        assert_eq!(config.reward().recipient(), &None);
    }
}
