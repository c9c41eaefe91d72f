/*!
 * Monitor Shared Lock
 *
 * Blocking shared lock using parking_lot::Mutex + Condvar. The mutex is the
 * single serialization point for every counter transition; ineligible callers
 * park on the condvar and consume no CPU while waiting.
 *
 * # Wake Protocol
 *
 * An unlock that returns the counter to zero broadcasts to every waiter. A
 * neutral counter admits either side and the lock does not track which side
 * is in demand, so all waiters wake and re-check their predicate under the
 * mutex: the first to win the mutex decides the side, the rest of the
 * opposite side go back to sleep. Spurious wakes take the same path.
 */

use super::interrupt::Interrupt;
use super::state::Side;
use super::traits::SharedLock;
use crate::core::errors::{LockResult, SharedLockError};
use crate::core::limits::DEFAULT_INTERRUPT_POLL;
use crate::core::sync::config::LockConfig;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};

/// State guarded by the monitor mutex
#[derive(Debug, Default)]
struct MonitorState {
    counter: i64,
    /// Callers currently parked on the condvar
    waiters: usize,
}

/// Blocking shared lock built on a mutex and a broadcast condvar
#[derive(Debug)]
pub struct MonitorSharedLock {
    state: Mutex<MonitorState>,
    drained: Condvar,
    interrupt_poll: Duration,
}

impl MonitorSharedLock {
    /// Create a neutral lock
    pub const fn new() -> Self {
        Self::with_interrupt_poll(DEFAULT_INTERRUPT_POLL)
    }

    /// Create a neutral lock whose interruptible waits re-check the token
    /// at least every `interrupt_poll` (zero falls back to the default)
    pub const fn with_interrupt_poll(interrupt_poll: Duration) -> Self {
        let interrupt_poll = if interrupt_poll.is_zero() {
            DEFAULT_INTERRUPT_POLL
        } else {
            interrupt_poll
        };
        Self {
            state: Mutex::new(MonitorState {
                counter: 0,
                waiters: 0,
            }),
            drained: Condvar::new(),
            interrupt_poll,
        }
    }

    pub fn from_config(config: &LockConfig) -> Self {
        debug!(interrupt_poll = ?config.interrupt_poll, "Creating monitor shared lock");
        Self::with_interrupt_poll(config.interrupt_poll)
    }

    /// Number of callers currently parked waiting for eligibility
    pub fn waiter_count(&self) -> usize {
        self.state.lock().waiters
    }

    #[inline]
    fn park(&self, state: &mut MutexGuard<'_, MonitorState>) {
        state.waiters += 1;
        self.drained.wait(state);
        state.waiters -= 1;
    }

    fn acquire(&self, side: Side) {
        let mut state = self.state.lock();
        while !side.admits(state.counter) {
            self.park(&mut state);
        }
        state.counter += side.delta();
    }

    fn acquire_interruptible(&self, side: Side, interrupt: &Interrupt) -> LockResult<()> {
        let mut state = self.state.lock();
        while !side.admits(state.counter) {
            if interrupt.is_interrupted() {
                debug!(side = %side, counter = state.counter, "Monitor acquisition interrupted");
                return Err(SharedLockError::Interrupted { side });
            }
            state.waiters += 1;
            // Timed wait so a set token is noticed without an unlock
            self.drained.wait_for(&mut state, self.interrupt_poll);
            state.waiters -= 1;
        }
        state.counter += side.delta();
        Ok(())
    }

    fn try_acquire(&self, side: Side) -> bool {
        let mut state = self.state.lock();
        if side.admits(state.counter) {
            state.counter += side.delta();
            true
        } else {
            false
        }
    }

    #[inline]
    fn commit_release(&self, state: &mut MonitorState, side: Side) {
        state.counter -= side.delta();
        if state.counter == 0 {
            self.drained.notify_all();
        }
    }

    fn release(&self, side: Side) {
        let mut state = self.state.lock();
        debug_assert!(
            side.is_held_in(state.counter),
            "unlock of side {} without matching lock (counter was {})",
            side,
            state.counter
        );
        self.commit_release(&mut state, side);
    }

    fn try_release(&self, side: Side) -> LockResult<()> {
        let mut state = self.state.lock();
        if !side.is_held_in(state.counter) {
            warn!(
                side = %side,
                counter = state.counter,
                "Rejected release of a side that is not held"
            );
            return Err(SharedLockError::NotHeld {
                side,
                counter: state.counter,
            });
        }
        self.commit_release(&mut state, side);
        Ok(())
    }
}

impl Default for MonitorSharedLock {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedLock for MonitorSharedLock {
    fn lock_a(&self) {
        self.acquire(Side::A)
    }

    fn unlock_a(&self) {
        self.release(Side::A)
    }

    fn lock_b(&self) {
        self.acquire(Side::B)
    }

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
        self.state.lock().counter
    }

    fn name(&self) -> &'static str {
        "monitor"
    }
}
