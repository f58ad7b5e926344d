//! Module: value
//! Responsibility: dynamically typed row values used by the in-memory engine,
//! including the type-erased range value the aggregate folds over.

mod range;

#[cfg(test)]
mod tests;

use crate::types::{Range, RangeElement};
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::From;
use std::{cmp::Ordering, fmt};

pub use range::RangeValue;

///
/// Value
///
/// One column value. `Null` sorts first; values of different variants order
/// by variant rank so group keys have a total order.
///

#[derive(Clone, Debug, Eq, From, Hash, PartialEq)]
pub enum Value {
    #[from(ignore)]
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Range(RangeValue),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_range(&self) -> Option<&RangeValue> {
        match self {
            Self::Range(range) => Some(range),
            _ => None,
        }
    }

    /// SQL type name, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "unknown",
            Self::Int(_) => "bigint",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamptz",
            Self::Range(range) => range.range_type().sql_name(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Int(_) => 1,
            Self::Text(_) => 2,
            Self::Date(_) => 3,
            Self::Timestamp(_) => 4,
            Self::Range(_) => 5,
        }
    }

    /// Render as a SQL literal.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Int(value) => value.to_string(),
            Self::Text(value) => quote_literal(value),
            Self::Date(value) => quote_literal(&value.to_text()),
            Self::Timestamp(value) => quote_literal(&value.to_text()),
            Self::Range(range) => {
                format!("{}::{}", quote_literal(&range.to_string()), range.range_type())
            }
        }
    }
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Range(a), Self::Range(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Date(value) => f.write_str(&value.to_text()),
            Self::Timestamp(value) => f.write_str(&value.to_text()),
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T> From<Range<T>> for Value
where
    T: RangeElement,
    RangeValue: From<Range<T>>,
{
    fn from(range: Range<T>) -> Self {
        Self::Range(range.into())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
