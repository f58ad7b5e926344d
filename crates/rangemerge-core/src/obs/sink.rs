//! Metrics sink boundary.
//!
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
//! This module is the only bridge between execution logic and the
//! thread-local metrics state.

use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    StatementExecuted {
        kind: &'static str,
    },
    AggregateInstalled {
        replaced: bool,
    },
    AggregateDropped {
        skipped: bool,
    },
    AggregateQuery {
        rows_scanned: u64,
        groups: u64,
    },
    MigrationApplied {
        fake: bool,
    },
    MigrationReverted {
        fake: bool,
    },
    MigrationFailed,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;
            match event {
                MetricsEvent::StatementExecuted { .. } => {
                    ops.statements_executed = ops.statements_executed.saturating_add(1);
                }
                MetricsEvent::AggregateInstalled { replaced } => {
                    if replaced {
                        ops.aggregates_replaced = ops.aggregates_replaced.saturating_add(1);
                    } else {
                        ops.aggregates_created = ops.aggregates_created.saturating_add(1);
                    }
                }
                MetricsEvent::AggregateDropped { skipped } => {
                    if skipped {
                        ops.drops_skipped = ops.drops_skipped.saturating_add(1);
                    } else {
                        ops.aggregates_dropped = ops.aggregates_dropped.saturating_add(1);
                    }
                }
                MetricsEvent::AggregateQuery {
                    rows_scanned,
                    groups,
                } => {
                    ops.aggregate_queries = ops.aggregate_queries.saturating_add(1);
                    ops.rows_scanned = ops.rows_scanned.saturating_add(rows_scanned);
                    ops.groups_emitted = ops.groups_emitted.saturating_add(groups);
                }
                MetricsEvent::MigrationApplied { fake } => {
                    ops.migrations_applied = ops.migrations_applied.saturating_add(1);
                    if fake {
                        ops.migrations_faked = ops.migrations_faked.saturating_add(1);
                    }
                }
                MetricsEvent::MigrationReverted { fake } => {
                    ops.migrations_reverted = ops.migrations_reverted.saturating_add(1);
                    if fake {
                        ops.migrations_faked = ops.migrations_faked.saturating_add(1);
                    }
                }
                MetricsEvent::MigrationFailed => {
                    ops.migrations_failed = ops.migrations_failed.saturating_add(1);
                }
            }
        });
    }
}

/// Route one event to the scoped override, or the global sink when none is
/// installed.
pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit path, including unwind.
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
