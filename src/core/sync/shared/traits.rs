/*!
 * Shared Lock Trait
 *
 * The contract every shared lock implementation satisfies, so callers and
 * test suites can treat the spin and monitor variants interchangeably.
 *
 * # Contract
 *
 * - `lock_a` returns only once the counter was observed `>= 0` and the
 *   increment is committed; `lock_b` mirrors with `<= 0` and a decrement.
 * - Any number of distinct callers may hold the same side at once.
 * - A side is never acquired while the opposite side has holders.
 * - `unlock_*` is unchecked: calling it without a matching `lock_*` corrupts
 *   the counter (debug builds assert). Use `try_unlock_*` for a checked release.
 * - No fairness, no FIFO, no bound on wait time.
 */

use super::guard::SideGuard;
use super::interrupt::Interrupt;
use super::state::{LockState, Side};
use crate::core::errors::LockResult;

/// Two-sided shared exclusion lock
pub trait SharedLock: Send + Sync {
    /// Block until side A is eligible, then join its holders
    fn lock_a(&self);

    /// Release one side-A acquisition
    fn unlock_a(&self);

    /// Block until side B is eligible, then join its holders
    fn lock_b(&self);

    /// Release one side-B acquisition
    fn unlock_b(&self);

    /// Acquire side A only if no B holder is present right now
    fn try_lock_a(&self) -> bool;

    /// Acquire side B only if no A holder is present right now
    fn try_lock_b(&self) -> bool;

    /// Release side A, failing with `NotHeld` instead of corrupting the counter
    fn try_unlock_a(&self) -> LockResult<()>;

    /// Release side B, failing with `NotHeld` instead of corrupting the counter
    fn try_unlock_b(&self) -> LockResult<()>;

    /// Like `lock_a`, but gives up with `Interrupted` once the token is set
    fn lock_a_interruptible(&self, interrupt: &Interrupt) -> LockResult<()>;

    /// Like `lock_b`, but gives up with `Interrupted` once the token is set
    fn lock_b_interruptible(&self, interrupt: &Interrupt) -> LockResult<()>;

    /// Snapshot of the raw counter (may be stale by the time it is read)
    fn counter(&self) -> i64;

    /// Strategy name for debugging
    fn name(&self) -> &'static str;

    #[inline]
    fn lock(&self, side: Side) {
        match side {
            Side::A => self.lock_a(),
            Side::B => self.lock_b(),
        }
    }

    #[inline]
    fn unlock(&self, side: Side) {
        match side {
            Side::A => self.unlock_a(),
            Side::B => self.unlock_b(),
        }
    }

    #[inline]
    fn try_lock(&self, side: Side) -> bool {
        match side {
            Side::A => self.try_lock_a(),
            Side::B => self.try_lock_b(),
        }
    }

    fn try_unlock(&self, side: Side) -> LockResult<()> {
        match side {
            Side::A => self.try_unlock_a(),
            Side::B => self.try_unlock_b(),
        }
    }

    fn lock_interruptible(&self, side: Side, interrupt: &Interrupt) -> LockResult<()> {
        match side {
            Side::A => self.lock_a_interruptible(interrupt),
            Side::B => self.lock_b_interruptible(interrupt),
        }
    }

    /// Decoded snapshot of the counter
    fn state(&self) -> LockState {
        LockState::from_counter(self.counter())
    }

    /// Acquire `side` and release it when the guard drops
    fn guard(&self, side: Side) -> SideGuard<'_, Self>
    where
        Self: Sized,
    {
        self.lock(side);
        SideGuard::new(self, side)
    }

    fn guard_a(&self) -> SideGuard<'_, Self>
    where
        Self: Sized,
    {
        self.guard(Side::A)
    }

    fn guard_b(&self) -> SideGuard<'_, Self>
    where
        Self: Sized,
    {
        self.guard(Side::B)
    }

    /// Non-blocking `guard`
    fn try_guard(&self, side: Side) -> Option<SideGuard<'_, Self>>
    where
        Self: Sized,
    {
        if self.try_lock(side) {
            Some(SideGuard::new(self, side))
        } else {
            None
        }
    }
}
