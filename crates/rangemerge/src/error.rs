use crate::{
    config::ConfigError,
    core::{
        db::{ResponseError, query::QueryError},
        error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
        migration::MigrationError,
        types::RangeError,
    },
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<RangeError> for Error {
    fn from(err: RangeError) -> Self {
        Self::new(ErrorKind::Range, ErrorOrigin::Range, err.to_string())
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.origin, err.class) {
            (CoreErrorOrigin::Range, _) => ErrorKind::Range,
            (CoreErrorOrigin::Catalog | CoreErrorOrigin::Schema, class) => {
                ErrorKind::Schema(class.into())
            }
            (CoreErrorOrigin::Executor, ErrorClass::Conflict) => {
                ErrorKind::Schema(SchemaErrorKind::Conflict)
            }
            (CoreErrorOrigin::Executor, ErrorClass::Validation) => {
                ErrorKind::Schema(SchemaErrorKind::Invalid)
            }
            (CoreErrorOrigin::Executor, _) => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NoAggregates
            | QueryError::DuplicateAlias(_)
            | QueryError::UnknownField { .. }
            | QueryError::NotRangeColumn { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::Invalid),
                ErrorOrigin::Query,
                err.to_string(),
            ),

            QueryError::UnknownTable(_) => Self::new(
                ErrorKind::Query(QueryErrorKind::NotFound),
                ErrorOrigin::Query,
                err.to_string(),
            ),

            QueryError::Response(err) => err.into(),

            QueryError::Execute(err) => err.into(),
        }
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::NotScalar { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::NotScalar),
                ErrorOrigin::Response,
                err.to_string(),
            ),

            ResponseError::UnknownAlias { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::Invalid),
                ErrorOrigin::Response,
                err.to_string(),
            ),
        }
    }
}

impl From<MigrationError> for Error {
    fn from(err: MigrationError) -> Self {
        let kind = match &err {
            MigrationError::InvalidId(_)
            | MigrationError::UnknownMigration(_)
            | MigrationError::UnknownApp(_) => MigrationErrorKind::NotFound,
            MigrationError::DuplicateMigration(_)
            | MigrationError::UnknownDependency { .. }
            | MigrationError::DependencyCycle(_) => MigrationErrorKind::Graph,
            MigrationError::InconsistentHistory { .. } => MigrationErrorKind::InconsistentHistory,
            MigrationError::Irreversible(_) => MigrationErrorKind::Irreversible,
            MigrationError::Statement { .. } => MigrationErrorKind::Failed,
            MigrationError::Ledger(_) => MigrationErrorKind::Ledger,
        };

        Self::new(ErrorKind::Migration(kind), ErrorOrigin::Migration, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A range literal or construction was rejected.
    Range,

    Schema(SchemaErrorKind),
    Query(QueryErrorKind),
    Migration(MigrationErrorKind),
    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// SchemaErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SchemaErrorKind {
    /// Statement text or definition is malformed.
    Invalid,

    /// Statement shape is valid SQL this system does not issue.
    Unsupported,

    /// Referenced aggregate, function or relation does not exist.
    NotFound,

    /// Object already exists, or would change incompatibly.
    Conflict,
}

impl From<ErrorClass> for SchemaErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::NotFound => Self::NotFound,
            ErrorClass::Conflict => Self::Conflict,
            ErrorClass::Unsupported => Self::Unsupported,
            ErrorClass::Validation | ErrorClass::Internal | ErrorClass::InvariantViolation => {
                Self::Invalid
            }
        }
    }
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Query shape is invalid (unknown columns, aliases, non-range input).
    Invalid,

    /// Queried table does not exist.
    NotFound,

    /// A single value was requested from a grouped or multi-row response.
    NotScalar,
}

///
/// MigrationErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MigrationErrorKind {
    /// Unknown migration id or app.
    NotFound,

    /// Duplicate ids, unknown dependencies or cycles.
    Graph,

    InconsistentHistory,
    Irreversible,

    /// A statement failed; the migration was not recorded.
    Failed,

    /// The ledger could not be read or written.
    Ledger,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Catalog,
    Config,
    Executor,
    Migration,
    Query,
    Range,
    Response,
    Schema,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Catalog => Self::Catalog,
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Range => Self::Range,
            CoreErrorOrigin::Schema => Self::Schema,
        }
    }
}
