/*!
 * Lock Limits and Constants
 *
 * Centralized location for the thresholds and magic numbers used by the
 * shared lock implementations.
 *
 * ## Conventions
 * - Performance-critical constants are marked with [PERF]
 */

use std::time::Duration;

// =============================================================================
// SPIN BACKOFF
// =============================================================================

/// Exponent cap for the spin phase of exponential backoff (2^6 = 64 spin hints)
/// [PERF] Beyond this the waiter yields its time slice instead of spinning longer
pub const BACKOFF_SPIN_LIMIT: u32 = 6;

/// Exponent cap for the whole exponential backoff sequence
/// Once reached, every further step yields and the step counter stops growing
pub const BACKOFF_YIELD_LIMIT: u32 = 10;

// =============================================================================
// MONITOR
// =============================================================================

/// Default re-check interval for interruptible monitor waits (1ms)
/// Bounds how long an interrupted waiter may stay parked before noticing
pub const DEFAULT_INTERRUPT_POLL: Duration = Duration::from_millis(1);

/// Cache line size used to pad the spin counter
/// [PERF] Keeps the contended counter off lines shared with neighbouring data
pub const CACHE_LINE_SIZE: usize = 64;
