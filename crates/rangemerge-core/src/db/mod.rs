//! Module: db
//! Responsibility: the in-memory engine: aggregate catalog, entity tables,
//! the aggregate query builder and its executor.
//! Does not own: statement text (see `schema`) or migration ordering.

mod catalog;
mod entity;
mod executor;
pub mod query;
mod response;
mod session;
mod store;

#[cfg(test)]
mod tests;

pub use catalog::{BuiltinFunction, Catalog, DdlOutcome, ResolvedAggregate};
pub use entity::{ColumnDef, ColumnType, EntityKind, TableSchema};
pub use response::{AggregateResponse, AggregateRow, ResponseError};
pub use session::MemoryDb;
pub use store::{Row, Table};
