//! Core runtime for rangemerge: the range type, the `range_merge` reduction,
//! aggregate DDL, migrations and a small in-memory engine that evaluates the
//! aggregate end to end.

// public exports are one module level down
pub mod aggregate;
pub mod db;
pub mod error;
pub mod migration;
pub mod model;
pub mod obs;
pub mod schema;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors or runners are re-exported here.
///

pub mod prelude {
    pub use crate::{
        aggregate::{RangeMergeState, range_merge, range_merge_all},
        db::{
            EntityKind,
            query::{AggregateExpr, AggregateQuery, FieldRef, Predicate},
        },
        schema::AggregateDefinition,
        types::{Range, RangeBound, RangeElement, RangeType},
        value::{RangeValue, Value},
    };
}
