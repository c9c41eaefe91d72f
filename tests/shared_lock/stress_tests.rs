/*!
 * Stress Tests
 *
 * Many threads hammer one lock with the four access patterns of the
 * benchmark (A, B, A-then-B, B-then-A). A witness pair of counters, updated
 * only inside critical sections, detects any overlap of the two sides.
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_lock::monitoring::WorkloadSpan;
use shared_lock::{SharedLock, Side};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 4;
const ITERATIONS: usize = 500;

#[derive(Default)]
struct Witness {
    in_a: AtomicUsize,
    in_b: AtomicUsize,
    max_a: AtomicUsize,
    violation: AtomicBool,
}

impl Witness {
    fn enter(&self, side: Side, counter: i64) {
        let (mine, theirs) = match side {
            Side::A => (&self.in_a, &self.in_b),
            Side::B => (&self.in_b, &self.in_a),
        };
        let now = mine.fetch_add(1, Ordering::SeqCst) + 1;
        if side == Side::A {
            self.max_a.fetch_max(now, Ordering::Relaxed);
        }
        let wrong_sign = match side {
            Side::A => counter <= 0,
            Side::B => counter >= 0,
        };
        if theirs.load(Ordering::SeqCst) != 0 || wrong_sign {
            self.violation.store(true, Ordering::SeqCst);
        }
    }

    fn exit(&self, side: Side) {
        match side {
            Side::A => self.in_a.fetch_sub(1, Ordering::SeqCst),
            Side::B => self.in_b.fetch_sub(1, Ordering::SeqCst),
        };
    }
}

fn critical_section<L: SharedLock>(lock: &L, witness: &Witness, side: Side) {
    lock.lock(side);
    witness.enter(side, lock.counter());
    std::hint::spin_loop();
    witness.exit(side);
    lock.unlock(side);
}

fn run_pattern<L: SharedLock + 'static>(
    lock: Arc<L>,
    pattern: &'static [Side],
    name: &'static str,
) {
    let witness = Arc::new(Witness::default());
    let start = Arc::new(Barrier::new(THREADS));
    let _span = WorkloadSpan::new(name, lock.name(), THREADS);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lock = lock.clone();
            let witness = witness.clone();
            let start = start.clone();
            thread::spawn(move || {
                start.wait();
                for _ in 0..ITERATIONS {
                    for &side in pattern {
                        critical_section(&*lock, &witness, side);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(
        !witness.violation.load(Ordering::SeqCst),
        "{}: both sides held at once",
        lock.name()
    );
    assert_eq!(lock.counter(), 0, "{}: unbalanced after workload", lock.name());
}

fn stress_a_only<L: SharedLock + 'static>(lock: Arc<L>) {
    run_pattern(lock, &[Side::A], "lock_unlock_a");
}

fn stress_b_only<L: SharedLock + 'static>(lock: Arc<L>) {
    run_pattern(lock, &[Side::B], "lock_unlock_b");
}

fn stress_a_then_b<L: SharedLock + 'static>(lock: Arc<L>) {
    run_pattern(lock, &[Side::A, Side::B], "lock_unlock_a_lock_unlock_b");
}

fn stress_b_then_a<L: SharedLock + 'static>(lock: Arc<L>) {
    run_pattern(lock, &[Side::B, Side::A], "lock_unlock_b_lock_unlock_a");
}

fn stress_random_sides<L: SharedLock + 'static>(lock: Arc<L>) {
    let witness = Arc::new(Witness::default());

    let handles: Vec<_> = (0..THREADS)
        .map(|seed| {
            let lock = lock.clone();
            let witness = witness.clone();
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed as u64);
                for _ in 0..ITERATIONS {
                    let side = if rng.gen_bool(0.5) { Side::A } else { Side::B };
                    if rng.gen_bool(0.2) {
                        // Exercise the RAII path as well
                        let guard = lock.guard(side);
                        witness.enter(side, lock.counter());
                        witness.exit(side);
                        drop(guard);
                    } else {
                        critical_section(&*lock, &witness, side);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(!witness.violation.load(Ordering::SeqCst));
    assert_eq!(lock.counter(), 0);
}

fn same_side_holders_overlap<L: SharedLock + 'static>(lock: Arc<L>) {
    let witness = Arc::new(Witness::default());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lock = lock.clone();
            let witness = witness.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                lock.lock_a();
                witness.enter(Side::A, lock.counter());
                // Everyone is inside before anyone leaves
                barrier.wait();
                witness.exit(Side::A);
                lock.unlock_a();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(!witness.violation.load(Ordering::SeqCst));
    assert_eq!(witness.max_a.load(Ordering::SeqCst), THREADS);
    assert_eq!(lock.counter(), 0);
}

for_each_lock!(
    stress_a_only,
    stress_b_only,
    stress_a_then_b,
    stress_b_then_a,
    stress_random_sides,
    same_side_holders_overlap,
);
