use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// ResolveCounters
/// Ephemeral, in-memory counters for resolution passes.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResolveCounters {
    // Entrypoints
    pub resolve_calls: u64,
    pub resolve_ok: u64,
    pub resolve_failed: u64,

    // Field paths
    pub fields_resolved: u64,
    pub relation_hops: u64,

    // Cone search
    pub cones_recorded: u64,

    /// Failures keyed by error kind name.
    pub failures: BTreeMap<String, u64>,
}

///
/// EventState
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) counters: ResolveCounters,
    pub(crate) models: BTreeMap<String, u64>,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub counters: ResolveCounters,

    /// Resolution calls per target model.
    pub models: BTreeMap<String, u64>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        counters: m.counters.clone(),
        models: m.models.clone(),
    })
}
