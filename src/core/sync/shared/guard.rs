/*!
 * Side Guard
 *
 * RAII handle for one acquisition of a side. Dropping it performs the
 * matching unlock, so a guard can never produce an unbalanced release.
 */

use super::state::Side;
use super::traits::SharedLock;
use std::fmt;

/// Holds one acquisition of `side` on `lock` until dropped
#[must_use = "dropping the guard immediately releases the side"]
pub struct SideGuard<'a, L: SharedLock + ?Sized> {
    lock: &'a L,
    side: Side,
}

impl<'a, L: SharedLock + ?Sized> SideGuard<'a, L> {
    /// Wrap an acquisition that has already been committed
    pub(crate) fn new(lock: &'a L, side: Side) -> Self {
        Self { lock, side }
    }

    /// Side held by this guard
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Release explicitly (same as dropping)
    pub fn release(self) {
        drop(self);
    }
}

impl<L: SharedLock + ?Sized> Drop for SideGuard<'_, L> {
    fn drop(&mut self) {
        self.lock.unlock(self.side);
    }
}

impl<L: SharedLock + ?Sized> fmt::Debug for SideGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideGuard")
            .field("lock", &self.lock.name())
            .field("side", &self.side)
            .finish()
    }
}
