/*!
 * Synchronization Primitives
 *
 * Shared exclusion locks with selectable waiting strategies:
 * - Spin-based (lock-free, lowest latency for short cross-side transitions)
 * - Monitor-based (parks waiters, robust when a side is held for long)
 */

mod config;
pub mod shared;

pub use config::{Backoff, LockConfig, StrategyType};
pub use config::{ENV_BACKOFF, ENV_INTERRUPT_POLL_US, ENV_STRATEGY};
pub use shared::{
    ConfiguredSharedLock, Interrupt, LockState, MonitorSharedLock, SharedLock, Side, SideGuard,
    SpinSharedLock,
};
