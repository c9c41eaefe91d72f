/*!
 * Tracing
 * Structured logging for lock workloads using the tracing crate
 *
 * The lock primitives only emit events; installing a subscriber is left to
 * the binary, benchmark or test driving them.
 */

use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Workloads slower than this are reported at `warn`
const SLOW_WORKLOAD: Duration = Duration::from_secs(1);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SHARED_LOCK_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SHARED_LOCK_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one workload run against a lock (a benchmark batch or a
/// stress test); logs its duration when dropped
pub struct WorkloadSpan {
    span: tracing::Span,
    start: Instant,
    workload: &'static str,
}

impl WorkloadSpan {
    pub fn new(workload: &'static str, strategy: &'static str, threads: usize) -> Self {
        let span = span!(
            Level::DEBUG,
            "workload",
            workload = workload,
            strategy = strategy,
            threads = threads,
            duration_us = tracing::field::Empty,
        );
        debug!(parent: &span, "workload started");

        Self {
            span,
            start: Instant::now(),
            workload,
        }
    }

    /// Elapsed time since the span was opened
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for WorkloadSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);
        let _entered = self.span.enter();

        if duration > SLOW_WORKLOAD {
            warn!(
                workload = self.workload,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow workload"
            );
        } else {
            debug!(
                workload = self.workload,
                duration_us = duration.as_micros() as u64,
                "workload completed"
            );
        }
    }
}
