/*!
 * Shared Lock Configuration
 *
 * Runtime configuration for lock strategy and spin backoff selection
 */

use crate::core::errors::{LockResult, SharedLockError};
use crate::core::limits::DEFAULT_INTERRUPT_POLL;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the lock strategy
pub const ENV_STRATEGY: &str = "SHARED_LOCK_STRATEGY";
/// Environment variable selecting the spin backoff policy
pub const ENV_BACKOFF: &str = "SHARED_LOCK_BACKOFF";
/// Environment variable overriding the interrupt poll interval (microseconds)
pub const ENV_INTERRUPT_POLL_US: &str = "SHARED_LOCK_INTERRUPT_POLL_US";

/// Strategy type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Lock-free busy-wait on an atomic counter
    Spin,
    /// Mutex + condvar, waiters are parked
    Monitor,
    /// Auto-select (resolves to Monitor)
    Auto,
}

impl FromStr for StrategyType {
    type Err = SharedLockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spin" => Ok(Self::Spin),
            "monitor" => Ok(Self::Monitor),
            "auto" => Ok(Self::Auto),
            other => Err(SharedLockError::InvalidConfig(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// What a spinning waiter does between two reads of the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// Re-read immediately with no hint
    Immediate,
    /// Issue a single `spin_loop` hint per re-read
    #[default]
    SpinHint,
    /// Yield the time slice on every re-read
    Yield,
    /// Doubling runs of spin hints, then yields
    Exponential,
}

impl FromStr for Backoff {
    type Err = SharedLockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "spin_hint" | "spinhint" => Ok(Self::SpinHint),
            "yield" => Ok(Self::Yield),
            "exponential" => Ok(Self::Exponential),
            other => Err(SharedLockError::InvalidConfig(format!(
                "unknown backoff '{}'",
                other
            ))),
        }
    }
}

/// Shared lock configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Preferred strategy
    pub strategy: StrategyType,
    /// Wait policy for the spin strategy
    pub backoff: Backoff,
    /// Re-check interval for interruptible monitor waits
    #[serde(with = "duration_micros")]
    pub interrupt_poll: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyType::Auto,
            backoff: Backoff::default(),
            interrupt_poll: DEFAULT_INTERRUPT_POLL,
        }
    }
}

impl LockConfig {
    /// Configuration optimized for short, rare cross-side transitions
    pub const fn low_latency() -> Self {
        Self {
            strategy: StrategyType::Spin,
            backoff: Backoff::Exponential,
            interrupt_poll: DEFAULT_INTERRUPT_POLL,
        }
    }

    /// Configuration optimized for sides held for long intervals
    pub const fn long_wait() -> Self {
        Self {
            strategy: StrategyType::Monitor,
            backoff: Backoff::Yield,
            interrupt_poll: DEFAULT_INTERRUPT_POLL,
        }
    }

    /// Plain busy-poll: spin with no backoff at all
    pub const fn busy_poll() -> Self {
        Self {
            strategy: StrategyType::Spin,
            backoff: Backoff::Immediate,
            interrupt_poll: DEFAULT_INTERRUPT_POLL,
        }
    }

    /// Resolve `Auto` to a concrete strategy
    pub fn select_strategy(&self) -> StrategyType {
        match self.strategy {
            StrategyType::Auto => StrategyType::Monitor,
            other => other,
        }
    }

    /// Load configuration from `SHARED_LOCK_*` environment variables
    ///
    /// Unset variables keep their defaults; malformed values are an error.
    pub fn from_env() -> LockResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from a JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> LockResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the locks cannot honour
    ///
    /// `interrupt_poll` must be positive: with zero, interruptible monitor
    /// waits expire immediately and never park.
    pub fn validate(&self) -> LockResult<()> {
        if self.interrupt_poll.is_zero() {
            return Err(SharedLockError::InvalidConfig(
                "interrupt_poll must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn from_lookup<F>(lookup: F) -> LockResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_STRATEGY) {
            config.strategy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_BACKOFF) {
            config.backoff = value.parse()?;
        }
        if let Some(value) = lookup(ENV_INTERRUPT_POLL_US) {
            let micros: u64 = value.trim().parse().map_err(|_| {
                SharedLockError::InvalidConfig(format!(
                    "{} must be an integer, got '{}'",
                    ENV_INTERRUPT_POLL_US, value
                ))
            })?;
            config.interrupt_poll = Duration::from_micros(micros);
        }

        config.validate()?;
        Ok(config)
    }
}

mod duration_micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_micros() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_micros)
    }
}
