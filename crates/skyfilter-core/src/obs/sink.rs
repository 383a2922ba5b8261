//! Metrics sink boundary.
//!
//! All resolver instrumentation flows through `MetricsEvent` and
//! `MetricsSink`; this module is the only bridge to the counter state.
use crate::{error::ResolveErrorKind, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ResolveStart { model: String },
    ResolveFinish { model: String, cones: usize },
    ResolveFailed { model: String, kind: ResolveErrorKind },
    FieldResolved { depth: usize },
    ConeRecorded { index: usize },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let c = &mut m.counters;
            match event {
                MetricsEvent::ResolveStart { model } => {
                    c.resolve_calls = c.resolve_calls.saturating_add(1);
                    let entry = m.models.entry(model).or_default();
                    *entry = entry.saturating_add(1);
                }
                MetricsEvent::ResolveFinish { .. } => {
                    c.resolve_ok = c.resolve_ok.saturating_add(1);
                }
                MetricsEvent::ResolveFailed { kind, .. } => {
                    c.resolve_failed = c.resolve_failed.saturating_add(1);
                    let entry = c.failures.entry(kind.to_string()).or_default();
                    *entry = entry.saturating_add(1);
                }
                MetricsEvent::FieldResolved { depth } => {
                    c.fields_resolved = c.fields_resolved.saturating_add(1);
                    c.relation_hops = c.relation_hops.saturating_add(depth as u64);
                }
                MetricsEvent::ConeRecorded { .. } => {
                    c.cones_recorded = c.cones_recorded.saturating_add(1);
                }
            }
        });
    }
}

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit path, including unwinding.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
