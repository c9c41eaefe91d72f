/*!
 * Configured Shared Lock
 *
 * Runtime-selected shared lock. Picks the spin or monitor variant from a
 * `LockConfig` once, at construction, and forwards every operation through
 * an enum `match` (no vtable).
 */

use super::interrupt::Interrupt;
use super::monitor::MonitorSharedLock;
use super::spin::SpinSharedLock;
use super::traits::SharedLock;
use crate::core::errors::LockResult;
use crate::core::sync::config::{LockConfig, StrategyType};
use tracing::info;

/// Lock implementation (enum dispatch)
#[derive(Debug)]
enum SharedLockImpl {
    Spin(SpinSharedLock),
    Monitor(MonitorSharedLock),
}

/// Shared lock whose strategy is chosen from configuration
///
/// # Examples
///
/// ```
/// use shared_lock::core::sync::{ConfiguredSharedLock, LockConfig, SharedLock};
///
/// let lock = ConfiguredSharedLock::new(&LockConfig::low_latency());
/// assert_eq!(lock.name(), "spin");
///
/// lock.lock_a();
/// lock.unlock_a();
/// assert_eq!(lock.counter(), 0);
/// ```
#[derive(Debug)]
pub struct ConfiguredSharedLock {
    inner: SharedLockImpl,
}

impl ConfiguredSharedLock {
    pub fn new(config: &LockConfig) -> Self {
        let strategy = config.select_strategy();

        let inner = match strategy {
            StrategyType::Spin => SharedLockImpl::Spin(SpinSharedLock::from_config(config)),
            StrategyType::Monitor | StrategyType::Auto => {
                SharedLockImpl::Monitor(MonitorSharedLock::from_config(config))
            }
        };

        info!(strategy = ?strategy, "Shared lock strategy selected");
        Self { inner }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(&LockConfig::default())
    }

    /// Create from `SHARED_LOCK_*` environment variables
    pub fn from_env() -> LockResult<Self> {
        Ok(Self::new(&LockConfig::from_env()?))
    }

    /// Concrete strategy in use
    pub fn strategy(&self) -> StrategyType {
        match &self.inner {
            SharedLockImpl::Spin(_) => StrategyType::Spin,
            SharedLockImpl::Monitor(_) => StrategyType::Monitor,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $lock:ident => $body:expr) => {
        match &$self.inner {
            SharedLockImpl::Spin($lock) => $body,
            SharedLockImpl::Monitor($lock) => $body,
        }
    };
}

impl SharedLock for ConfiguredSharedLock {
    #[inline(always)]
    fn lock_a(&self) {
        dispatch!(self, l => l.lock_a())
    }

    #[inline(always)]
    fn unlock_a(&self) {
        dispatch!(self, l => l.unlock_a())
    }

    #[inline(always)]
    fn lock_b(&self) {
        dispatch!(self, l => l.lock_b())
    }

    #[inline(always)]
    fn unlock_b(&self) {
        dispatch!(self, l => l.unlock_b())
    }

    fn try_lock_a(&self) -> bool {
        dispatch!(self, l => l.try_lock_a())
    }

    fn try_lock_b(&self) -> bool {
        dispatch!(self, l => l.try_lock_b())
    }

    fn try_unlock_a(&self) -> LockResult<()> {
        dispatch!(self, l => l.try_unlock_a())
    }

    fn try_unlock_b(&self) -> LockResult<()> {
        dispatch!(self, l => l.try_unlock_b())
    }

    fn lock_a_interruptible(&self, interrupt: &Interrupt) -> LockResult<()> {
        dispatch!(self, l => l.lock_a_interruptible(interrupt))
    }

    fn lock_b_interruptible(&self, interrupt: &Interrupt) -> LockResult<()> {
        dispatch!(self, l => l.lock_b_interruptible(interrupt))
    }

    fn counter(&self) -> i64 {
        dispatch!(self, l => l.counter())
    }

    fn name(&self) -> &'static str {
        dispatch!(self, l => l.name())
    }
}
