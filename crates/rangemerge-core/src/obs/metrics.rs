use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory counters for DDL, query and migration operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub since_ms: i64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            since_ms: Utc::now().timestamp_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // DDL
    pub statements_executed: u64,
    pub aggregates_created: u64,
    pub aggregates_replaced: u64,
    pub aggregates_dropped: u64,
    pub drops_skipped: u64,

    // Aggregate evaluation
    pub aggregate_queries: u64,
    pub rows_scanned: u64,
    pub groups_emitted: u64,

    // Migrations
    pub migrations_applied: u64,
    pub migrations_reverted: u64,
    pub migrations_faked: u64,
    pub migrations_failed: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub since_ms: i64,
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

pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        since_ms: m.since_ms,
    })
}
