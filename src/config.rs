//! Game configuration
//!
//! Defaults, overridden by `MEMORY_*` environment variables, overridden in turn
//! by command-line flags in the binary.

use crate::core::Deck;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Pairs dealt when nothing else is configured
pub const DEFAULT_PAIR_COUNT: usize = 5;

/// How long an unmatched card stays face up
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Resolution of the elapsed-time display
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Invalid configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a round needs at least one pair")]
    NoPairs,

    #[error("{requested} pairs requested but the deck only has {available} faces")]
    TooManyPairs { requested: usize, available: usize },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Settings for a game session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub pair_count: usize,
    pub hide_delay: Duration,
    pub tick_interval: Duration,
    /// Show hidden faces dimmed
    pub cheat: bool,
    /// Fixed RNG seed for reproducible deals
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            hide_delay: DEFAULT_HIDE_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            cheat: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEMORY_PAIRS` - Pairs per round (default: 5)
    /// - `MEMORY_HIDE_DELAY_MS` - Auto-hide delay in milliseconds (default: 3000)
    /// - `MEMORY_SEED` - Fixed shuffle seed (default: random)
    /// - `MEMORY_CHEAT` - `1`/`true`/`yes`/`on` to start with cheat mode on
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an arbitrary variable source
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(pairs) = parse::<usize>(lookup("MEMORY_PAIRS")) {
            config.pair_count = pairs;
        }
        if let Some(millis) = parse::<u64>(lookup("MEMORY_HIDE_DELAY_MS")) {
            config.hide_delay = Duration::from_millis(millis);
        }
        if let Some(seed) = parse::<u64>(lookup("MEMORY_SEED")) {
            config.seed = Some(seed);
        }
        if let Some(flag) = lookup("MEMORY_CHEAT") {
            config.cheat = parse_flag(&flag);
        }

        config
    }

    /// Check the configuration against the deck it will deal from
    ///
    /// # Errors
    /// Returns `ConfigError` if there are no pairs, more pairs than faces, or a zero tick.
    pub fn validate(&self, deck: &Deck) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        if self.pair_count > deck.len() {
            return Err(ConfigError::TooManyPairs {
                requested: self.pair_count,
                available: deck.len(),
            });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
