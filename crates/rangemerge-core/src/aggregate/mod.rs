//! Module: aggregate
//! Responsibility: the `range_merge` reduction: the binary step function and
//! the accumulator state folded over one aggregation group.
//! Does not own: catalog registration or query execution (see `db`).
//!
//! The reduction keeps only running extrema, so it is associative and
//! commutative: any grouping or ordering of the inputs yields the same range.

mod state;
mod step;

#[cfg(test)]
mod tests;

pub use state::{RangeMergeState, range_merge_all};
pub use step::range_merge;
