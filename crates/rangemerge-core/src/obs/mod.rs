//! Observability: runtime counters and the sink they flow through.
//!
//! Catalog, executor and migration code never touch `metrics` directly;
//! every event goes through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
