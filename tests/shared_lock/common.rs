/*!
 * Shared helpers for shared lock integration tests
 */

use shared_lock::SharedLock;
use std::thread;
use std::time::{Duration, Instant};

/// Instantiate generic `fn(Arc<L>)` tests once per lock implementation
macro_rules! for_each_lock {
    ($($name:ident),* $(,)?) => {
        mod spin {
            $(
                #[test]
                fn $name() {
                    super::$name(std::sync::Arc::new(shared_lock::SpinSharedLock::new()));
                }
            )*
        }

        mod spin_immediate {
            $(
                #[test]
                fn $name() {
                    super::$name(std::sync::Arc::new(shared_lock::SpinSharedLock::with_backoff(
                        shared_lock::Backoff::Immediate,
                    )));
                }
            )*
        }

        mod spin_exponential {
            $(
                #[test]
                fn $name() {
                    super::$name(std::sync::Arc::new(shared_lock::SpinSharedLock::with_backoff(
                        shared_lock::Backoff::Exponential,
                    )));
                }
            )*
        }

        mod monitor {
            $(
                #[test]
                fn $name() {
                    super::$name(std::sync::Arc::new(shared_lock::MonitorSharedLock::new()));
                }
            )*
        }

        mod configured {
            $(
                #[test]
                fn $name() {
                    super::$name(std::sync::Arc::new(
                        shared_lock::ConfiguredSharedLock::with_defaults(),
                    ));
                }
            )*
        }
    };
}

/// Poll `condition` until it holds, failing the test after five seconds
pub fn eventually<F: Fn() -> bool>(what: &str, condition: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        thread::sleep(Duration::from_millis(1));
    }
}

/// Give a contender time to reach its wait loop
pub fn settle() {
    thread::sleep(Duration::from_millis(50));
}

/// Every implementation under test, for scripts that compare them
pub fn all_locks() -> Vec<Box<dyn SharedLock>> {
    vec![
        Box::new(shared_lock::SpinSharedLock::new()),
        Box::new(shared_lock::SpinSharedLock::with_backoff(
            shared_lock::Backoff::Immediate,
        )),
        Box::new(shared_lock::MonitorSharedLock::new()),
        Box::new(shared_lock::ConfiguredSharedLock::new(
            &shared_lock::LockConfig::low_latency(),
        )),
    ]
}
