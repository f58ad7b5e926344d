use super::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn global_sink_counts_events() {
    metrics_reset_all();

    sink::record(MetricsEvent::AggregateInstalled { replaced: false });
    sink::record(MetricsEvent::AggregateInstalled { replaced: true });
    sink::record(MetricsEvent::AggregateDropped { skipped: true });
    sink::record(MetricsEvent::AggregateQuery {
        rows_scanned: 3,
        groups: 1,
    });
    sink::record(MetricsEvent::MigrationApplied { fake: true });
    sink::record(MetricsEvent::MigrationFailed);

    let ops = metrics_report().ops;
    assert_eq!(ops.aggregates_created, 1);
    assert_eq!(ops.aggregates_replaced, 1);
    assert_eq!(ops.drops_skipped, 1);
    assert_eq!(ops.aggregates_dropped, 0);
    assert_eq!(ops.aggregate_queries, 1);
    assert_eq!(ops.rows_scanned, 3);
    assert_eq!(ops.groups_emitted, 1);
    assert_eq!(ops.migrations_applied, 1);
    assert_eq!(ops.migrations_faked, 1);
    assert_eq!(ops.migrations_failed, 1);

    metrics_reset_all();
    assert_eq!(metrics_report().ops, EventOps::default());
}

#[test]
fn scoped_sink_captures_and_restores() {
    metrics_reset_all();
    let capture = Rc::new(CaptureSink::default());

    with_metrics_sink(capture.clone(), || {
        sink::record(MetricsEvent::StatementExecuted {
            kind: "create_aggregate",
        });
    });
    sink::record(MetricsEvent::MigrationReverted { fake: false });

    assert_eq!(
        *capture.events.borrow(),
        vec![MetricsEvent::StatementExecuted {
            kind: "create_aggregate"
        }]
    );

    let ops = metrics_report().ops;
    assert_eq!(ops.statements_executed, 0);
    assert_eq!(ops.migrations_reverted, 1);
}
