/*!
 * Shared Locks
 *
 * Two-sided exclusion locks: while side A has holders no caller may hold
 * side B, and vice versa. Any number of distinct callers may hold the same
 * side at once.
 *
 * Two interchangeable implementations of the `SharedLock` trait:
 * - `SpinSharedLock`: atomic counter + CAS retry loop, waiters busy-poll
 * - `MonitorSharedLock`: mutex + broadcast condvar, waiters park
 *
 * `ConfiguredSharedLock` picks one at runtime from a `LockConfig`.
 */

mod backoff;
mod configured;
mod guard;
mod interrupt;
mod monitor;
mod spin;
mod state;
mod traits;

pub use configured::ConfiguredSharedLock;
pub use guard::SideGuard;
pub use interrupt::Interrupt;
pub use monitor::MonitorSharedLock;
pub use spin::SpinSharedLock;
pub use state::{LockState, Side};
pub use traits::SharedLock;
