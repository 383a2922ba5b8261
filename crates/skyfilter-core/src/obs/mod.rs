//! Observability: resolution counters and the sink abstraction.
//!
//! Resolver logic never touches counters directly; it emits `MetricsEvent`s
//! through `sink::record`, which routes to a scoped override when one is
//! installed and to the thread-local counters otherwise.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, ResolveCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
