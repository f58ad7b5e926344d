//! Aggregate execution over one in-memory table.
//!
//! The engine-native step function is strict: NULL inputs are skipped and the
//! first non-NULL input becomes the state. A group that saw no non-NULL input
//! yields NULL.

use crate::{
    db::{
        catalog::{BuiltinFunction, Catalog},
        query::{AggregateQuery, QueryError},
        response::{AggregateResponse, AggregateRow},
        store::Table,
    },
    error::InternalError,
    obs::sink::{self, MetricsEvent},
    value::{RangeValue, Value},
};
use std::collections::BTreeMap;
use tracing::debug;

// Resolved per-alias plan: output name, source column and step function.
struct AggregatePlan<'q> {
    alias: &'q str,
    field: &'q str,
    step: BuiltinFunction,
}

type GroupStates = Vec<Option<RangeValue>>;

pub(crate) fn execute_aggregate(
    catalog: &Catalog,
    table: &Table,
    query: &AggregateQuery,
) -> Result<AggregateResponse, QueryError> {
    let schema = table.schema();
    query.validate(schema)?;

    let mut plans = Vec::with_capacity(query.aggregates.len());
    for (alias, expr) in &query.aggregates {
        let arg_type = schema
            .column(&expr.field)
            .and_then(|column| column.ty.range_type())
            .ok_or_else(|| {
                InternalError::executor_invariant(format!(
                    "validated aggregate column \"{}\" lost its range type",
                    expr.field
                ))
            })?;
        let resolved = catalog.resolve(&expr.aggregate, arg_type)?;
        plans.push(AggregatePlan {
            alias,
            field: &expr.field,
            step: resolved.step,
        });
    }

    let mut groups: BTreeMap<Vec<Value>, GroupStates> = BTreeMap::new();
    if query.group_by.is_empty() {
        groups.insert(Vec::new(), vec![None; plans.len()]);
    }

    let mut rows_scanned = 0_u64;
    for row in table.rows() {
        rows_scanned += 1;
        if let Some(predicate) = &query.predicate
            && !predicate.eval(row)
        {
            continue;
        }

        let key = query
            .group_by
            .iter()
            .map(|field| row.get(field).cloned().unwrap_or(Value::Null))
            .collect::<Vec<_>>();
        let states = groups
            .entry(key)
            .or_insert_with(|| vec![None; plans.len()]);

        for (plan, state) in plans.iter().zip(states.iter_mut()) {
            let Some(next) = row.get(plan.field).and_then(Value::as_range) else {
                continue;
            };
            *state = Some(match state.take() {
                Some(current) => plan.step.apply(&current, next)?,
                None => next.clone(),
            });
        }
    }

    let rows = groups
        .into_iter()
        .map(|(group, states)| AggregateRow {
            group,
            values: plans
                .iter()
                .map(|plan| plan.alias.to_string())
                .zip(states)
                .collect(),
        })
        .collect::<Vec<_>>();

    let groups = u64::try_from(rows.len()).unwrap_or(u64::MAX);
    debug!(table = schema.name, rows_scanned, groups, "aggregate query evaluated");
    sink::record(MetricsEvent::AggregateQuery {
        rows_scanned,
        groups,
    });

    Ok(AggregateResponse::new(rows))
}
