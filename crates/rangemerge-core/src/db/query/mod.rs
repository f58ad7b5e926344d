//! Module: db::query
//! Responsibility: the aggregate query builder and its predicate tree,
//! rendered to SQL or validated for in-memory execution.
//! Does not own: row iteration or folding (see `db::executor`).

mod aggregate;
mod field;
mod predicate;


use crate::{db::response::ResponseError, error::InternalError};
use thiserror::Error as ThisError;

pub use aggregate::{AggregateExpr, AggregateQuery};
pub use field::FieldRef;
pub use predicate::Predicate;

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("aggregate query selects no aggregates")]
    NoAggregates,

    #[error("output alias \"{0}\" is used more than once")]
    DuplicateAlias(String),

    #[error("relation \"{0}\" does not exist")]
    UnknownTable(String),

    #[error("column \"{field}\" does not exist in relation \"{table}\"")]
    UnknownField { table: String, field: String },

    #[error("function {function}({ty}) does not exist: column \"{field}\" is not a range")]
    NotRangeColumn {
        function: String,
        field: String,
        ty: &'static str,
    },

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Execute(#[from] InternalError),
}

/// Quote an identifier for SQL output.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
