use crate::{
    error::InternalError,
    schema::{AggregateDefinition, AggregateSignature, parse},
};
use std::{fmt, str::FromStr};

///
/// Statement
///
/// Schema DDL this system issues. `Display` renders the exact SQL text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    CreateAggregate {
        or_replace: bool,
        definition: AggregateDefinition,
    },
    DropAggregate {
        if_exists: bool,
        signature: AggregateSignature,
    },
}

impl Statement {
    /// Parse one `CREATE [OR REPLACE] AGGREGATE` or
    /// `DROP AGGREGATE [IF EXISTS]` statement.
    pub fn parse(sql: &str) -> Result<Self, InternalError> {
        parse::parse_statement(sql)
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        self.to_string()
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateAggregate { .. } => "create_aggregate",
            Self::DropAggregate { .. } => "drop_aggregate",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateAggregate {
                or_replace,
                definition,
            } => {
                let replace = if *or_replace { " OR REPLACE" } else { "" };
                write!(
                    f,
                    "CREATE{replace} AGGREGATE {}({})(sfunc={}, stype={});",
                    definition.name, definition.arg_type, definition.sfunc, definition.stype
                )
            }
            Self::DropAggregate {
                if_exists,
                signature,
            } => {
                let exists = if *if_exists { " IF EXISTS" } else { "" };
                write!(f, "DROP AGGREGATE{exists} {signature};")
            }
        }
    }
}

impl FromStr for Statement {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
