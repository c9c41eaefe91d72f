/*!
 * Spin Shared Lock
 *
 * Lock-free shared lock: a single atomic counter is the entire lock. The sign
 * says which side is held and the magnitude counts its holders, so no
 * separate ownership bookkeeping exists.
 *
 * # Acquisition
 *
 * ```text
 * loop {
 *     read counter
 *     opposite side held?  -> backoff, re-read (no CAS attempted)
 *     CAS(current -> current ± 1)
 *     success -> done, failure -> retry from the read
 * }
 * ```
 *
 * Waiters never park. With `Backoff::Immediate` this is the plain busy-poll;
 * other policies only add spin hints or yields between reads.
 *
 * # Performance
 *
 * - Uncontended lock/unlock: one CAS + one RMW
 * - Burns a core per waiter while the opposite side is held
 * - No fairness: under alternating demand one side can starve indefinitely
 */

use super::backoff::Backoffer;
use super::interrupt::Interrupt;
use super::state::Side;
use super::traits::SharedLock;
use crate::core::errors::{LockResult, SharedLockError};
use crate::core::limits::CACHE_LINE_SIZE;
use crate::core::sync::config::{Backoff, LockConfig};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, warn};

/// Busy-waiting shared lock built on compare-and-swap
#[derive(Debug)]
#[repr(C, align(64))] // Cache-line aligned to prevent false sharing
pub struct SpinSharedLock {
    counter: AtomicI64,
    backoff: Backoff,
}

const _: () = assert!(std::mem::align_of::<SpinSharedLock>() == CACHE_LINE_SIZE);

impl SpinSharedLock {
    /// Create a neutral lock with the default backoff
    pub const fn new() -> Self {
        Self::with_backoff(Backoff::SpinHint)
    }

    /// Create a neutral lock with an explicit backoff policy
    pub const fn with_backoff(backoff: Backoff) -> Self {
        Self {
            counter: AtomicI64::new(0),
            backoff,
        }
    }

    pub fn from_config(config: &LockConfig) -> Self {
        debug!(backoff = ?config.backoff, "Creating spin shared lock");
        Self::with_backoff(config.backoff)
    }

    /// Backoff policy used between reads
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    #[inline(always)]
    fn acquire(&self, side: Side) {
        let mut backoff = Backoffer::new(self.backoff);
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            if !side.admits(current) {
                backoff.snooze();
                continue;
            }
            if self
                .counter
                .compare_exchange_weak(
                    current,
                    current + side.delta(),
                    Ordering::Acquire,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return;
            }
        }
    }

    fn acquire_interruptible(&self, side: Side, interrupt: &Interrupt) -> LockResult<()> {
        let mut backoff = Backoffer::new(self.backoff);
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            if !side.admits(current) {
                if interrupt.is_interrupted() {
                    debug!(side = %side, counter = current, "Spin acquisition interrupted");
                    return Err(SharedLockError::Interrupted { side });
                }
                backoff.snooze();
                continue;
            }
            if self
                .counter
                .compare_exchange_weak(
                    current,
                    current + side.delta(),
                    Ordering::Acquire,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return Ok(());
            }
        }
    }

    #[inline]
    fn try_acquire(&self, side: Side) -> bool {
        let mut current = self.counter.load(Ordering::Relaxed);
        // A lost race against a same-side acquirer does not make the side ineligible
        while side.admits(current) {
            match self.counter.compare_exchange_weak(
                current,
                current + side.delta(),
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
        false
    }

    #[inline(always)]
    fn release(&self, side: Side) {
        let prev = self.counter.fetch_sub(side.delta(), Ordering::Release);
        debug_assert!(
            side.is_held_in(prev),
            "unlock of side {} without matching lock (counter was {})",
            side,
            prev
        );
    }

    fn try_release(&self, side: Side) -> LockResult<()> {
        let mut current = self.counter.load(Ordering::Relaxed);
        loop {
            if !side.is_held_in(current) {
                warn!(
                    side = %side,
                    counter = current,
                    "Rejected release of a side that is not held"
                );
                return Err(SharedLockError::NotHeld {
                    side,
                    counter: current,
                });
            }
            match self.counter.compare_exchange_weak(
                current,
                current - side.delta(),
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for SpinSharedLock {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedLock for SpinSharedLock {
    #[inline]
    fn lock_a(&self) {
        self.acquire(Side::A)
    }

    #[inline]
    fn unlock_a(&self) {
        self.release(Side::A)
    }

    #[inline]
    fn lock_b(&self) {
        self.acquire(Side::B)
    }

    #[inline]
    fn unlock_b(&self) {
        self.release(Side::B)
    }

    fn try_lock_a(&self) -> bool {
        self.try_acquire(Side::A)
    }

    fn try_lock_b(&self) -> bool {
        self.try_acquire(Side::B)
    }

    fn try_unlock_a(&self) -> LockResult<()> {
        self.try_release(Side::A)
    }

    fn try_unlock_b(&self) -> LockResult<()> {
        self.try_release(Side::B)
    }

    fn lock_a_interruptible(&self, interrupt: &Interrupt) -> LockResult<()> {
        self.acquire_interruptible(Side::A, interrupt)
    }

    fn lock_b_interruptible(&self, interrupt: &Interrupt) -> LockResult<()> {
        self.acquire_interruptible(Side::B, interrupt)
    }

    fn counter(&self) -> i64 {
        self.counter.load(Ordering::Acquire)
    }

    fn name(&self) -> &'static str {
        "spin"
    }
}
