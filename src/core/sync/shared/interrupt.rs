/*!
 * Interrupt Token
 *
 * Cooperative cancellation for blocked acquisitions. A waiter passes the token
 * to `lock_*_interruptible`; any clone may set it from another thread.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable interrupt flag shared between a waiter and its interrupters
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that waiters holding this token give up
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Reset the token so it can be reused for another acquisition
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
