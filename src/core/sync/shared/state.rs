/*!
 * Shared Lock State
 *
 * The whole lock state is one signed counter:
 * - `counter > 0`: side A held by `counter` holders
 * - `counter < 0`: side B held by `-counter` holders
 * - `counter == 0`: neutral
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two mutually exclusive sides of a shared lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The side this one excludes
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Counter delta applied by an acquisition of this side
    #[inline(always)]
    pub(crate) const fn delta(self) -> i64 {
        match self {
            Side::A => 1,
            Side::B => -1,
        }
    }

    /// Whether a counter value admits an acquisition of this side
    #[inline(always)]
    pub(crate) const fn admits(self, counter: i64) -> bool {
        match self {
            Side::A => counter >= 0,
            Side::B => counter <= 0,
        }
    }

    /// Whether a counter value shows this side as held
    #[inline(always)]
    pub(crate) const fn is_held_in(self, counter: i64) -> bool {
        match self {
            Side::A => counter > 0,
            Side::B => counter < 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Decoded view of a counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "holders", rename_all = "snake_case")]
pub enum LockState {
    /// No side held
    Neutral,
    /// Side A held by N callers
    HeldA(u64),
    /// Side B held by N callers
    HeldB(u64),
}

impl LockState {
    /// Decode a raw counter value
    pub const fn from_counter(counter: i64) -> Self {
        if counter > 0 {
            LockState::HeldA(counter.unsigned_abs())
        } else if counter < 0 {
            LockState::HeldB(counter.unsigned_abs())
        } else {
            LockState::Neutral
        }
    }

    /// The held side, if any
    pub const fn side(&self) -> Option<Side> {
        match self {
            LockState::Neutral => None,
            LockState::HeldA(_) => Some(Side::A),
            LockState::HeldB(_) => Some(Side::B),
        }
    }

    /// Number of concurrent holders of the held side
    pub const fn holders(&self) -> u64 {
        match self {
            LockState::Neutral => 0,
            LockState::HeldA(n) | LockState::HeldB(n) => *n,
        }
    }

    pub const fn is_neutral(&self) -> bool {
        matches!(self, LockState::Neutral)
    }
}
