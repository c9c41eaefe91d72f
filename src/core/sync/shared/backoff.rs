/*!
 * Spin Backoff
 *
 * Wait step executed by a spinning waiter between two reads of the counter.
 * None of the policies park the thread: the worst a waiter does is give up
 * its time slice.
 *
 * Exponential policy:
 * 1. **Spin phase** (step < BACKOFF_SPIN_LIMIT): `2^step` spin hints
 * 2. **Yield phase**: `yield_now()` on every step
 */

use crate::core::limits::{BACKOFF_SPIN_LIMIT, BACKOFF_YIELD_LIMIT};
use crate::core::sync::config::Backoff;
use std::hint;
use std::thread;

/// Per-acquisition backoff state
pub(crate) struct Backoffer {
    policy: Backoff,
    step: u32,
}

impl Backoffer {
    #[inline(always)]
    pub(crate) const fn new(policy: Backoff) -> Self {
        Self { policy, step: 0 }
    }

    /// Wait once before the next read
    #[inline]
    pub(crate) fn snooze(&mut self) {
        match self.policy {
            Backoff::Immediate => {}
            Backoff::SpinHint => hint::spin_loop(),
            Backoff::Yield => thread::yield_now(),
            Backoff::Exponential => {
                if self.step < BACKOFF_SPIN_LIMIT {
                    for _ in 0..(1u32 << self.step) {
                        hint::spin_loop();
                    }
                } else {
                    thread::yield_now();
                }
                if self.step <= BACKOFF_YIELD_LIMIT {
                    self.step += 1;
                }
            }
        }
    }

    /// Whether the exponential sequence has reached its yielding phase
    #[cfg(test)]
    fn is_yielding(&self) -> bool {
        self.step >= BACKOFF_SPIN_LIMIT
    }
}
