/*!
 * Shared Lock Library
 * Two-sided shared exclusion locks with spin and monitor strategies
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{LockResult, SharedLockError};
pub use crate::core::sync::{
    Backoff, ConfiguredSharedLock, Interrupt, LockConfig, LockState, MonitorSharedLock,
    SharedLock, Side, SideGuard, SpinSharedLock, StrategyType,
};
pub use monitoring::init_tracing;
