/*!
 * Monitoring
 * Structured tracing setup and timing spans for lock workloads
 */

mod tracer;

pub use tracer::{init_tracing, WorkloadSpan};
