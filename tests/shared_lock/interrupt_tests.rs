/*!
 * Interruptible Acquisition Tests
 */

use crate::common::settle;
use shared_lock::{Interrupt, SharedLock, SharedLockError, Side};
use std::sync::Arc;
use std::thread;

fn interrupt_abandons_blocked_acquisition<L: SharedLock + 'static>(lock: Arc<L>) {
    for side in [Side::A, Side::B] {
        let interrupt = Interrupt::new();
        lock.lock(side.opposite());
        let held = lock.counter();

        let handle = {
            let lock = lock.clone();
            let interrupt = interrupt.clone();
            thread::spawn(move || lock.lock_interruptible(side, &interrupt))
        };

        settle();
        interrupt.interrupt();

        assert_eq!(
            handle.join().unwrap(),
            Err(SharedLockError::Interrupted { side })
        );
        // No partial mutation on the abandoned path
        assert_eq!(lock.counter(), held);
        lock.unlock(side.opposite());
        assert_eq!(lock.counter(), 0);
    }
}

fn uninterrupted_waiter_acquires_after_drain<L: SharedLock + 'static>(lock: Arc<L>) {
    let interrupt = Interrupt::new();
    lock.lock_b();

    let handle = {
        let lock = lock.clone();
        let interrupt = interrupt.clone();
        thread::spawn(move || {
            lock.lock_a_interruptible(&interrupt)?;
            let seen = lock.counter();
            lock.unlock_a();
            Ok::<_, SharedLockError>(seen)
        })
    };

    settle();
    lock.unlock_b();

    assert_eq!(handle.join().unwrap(), Ok(1));
    assert!(!interrupt.is_interrupted());
    assert_eq!(lock.counter(), 0);
}

fn preset_token_on_eligible_side_still_grants<L: SharedLock + 'static>(lock: Arc<L>) {
    let interrupt = Interrupt::new();
    interrupt.interrupt();

    lock.lock_a();
    assert!(lock.lock_a_interruptible(&interrupt).is_ok());
    assert_eq!(lock.counter(), 2);
    assert_eq!(
        lock.lock_b_interruptible(&interrupt),
        Err(SharedLockError::Interrupted { side: Side::B })
    );
    lock.unlock_a();
    lock.unlock_a();

    interrupt.clear();
    assert!(lock.lock_b_interruptible(&interrupt).is_ok());
    lock.unlock_b();
    assert_eq!(lock.counter(), 0);
}

for_each_lock!(
    interrupt_abandons_blocked_acquisition,
    uninterrupted_waiter_acquires_after_drain,
    preset_token_on_eligible_side_still_grants,
);
