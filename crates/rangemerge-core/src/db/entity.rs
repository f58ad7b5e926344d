use crate::{types::RangeType, value::Value};
use std::fmt;

///
/// ColumnType
///
/// Declared SQL type of one column. Every column is nullable.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnType {
    Int,
    Text,
    Date,
    Timestamp,
    Range(RangeType),
}

impl ColumnType {
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Int => "bigint",
            Self::Text => "text",
            Self::Date => "date",
            Self::Timestamp => "timestamptz",
            Self::Range(range_type) => range_type.sql_name(),
        }
    }

    #[must_use]
    pub const fn range_type(self) -> Option<RangeType> {
        match self {
            Self::Range(range_type) => Some(range_type),
            _ => None,
        }
    }

    /// Whether `value` may be stored in a column of this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null)
            | (Self::Int, Value::Int(_))
            | (Self::Text, Value::Text(_))
            | (Self::Date, Value::Date(_))
            | (Self::Timestamp, Value::Timestamp(_)) => true,
            (Self::Range(declared), Value::Range(range)) => {
                declared.accepts(range.range_type())
            }
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

///
/// ColumnDef
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl ColumnDef {
    #[must_use]
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty }
    }
}

///
/// TableSchema
///
/// Static shape of one table, taken from an `EntityKind`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableSchema {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    #[must_use]
    pub const fn for_entity<E: EntityKind>() -> Self {
        Self {
            name: E::TABLE,
            primary_key: E::PRIMARY_KEY,
            columns: E::COLUMNS,
        }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }
}

///
/// EntityKind
///
/// A Rust type persisted as rows of one table.
///

pub trait EntityKind {
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    const COLUMNS: &'static [ColumnDef];

    /// Current value of `field`, or `None` when the entity has no such field.
    fn field_value(&self, field: &str) -> Option<Value>;

    /// Primary key value.
    fn key(&self) -> Value {
        self.field_value(Self::PRIMARY_KEY).unwrap_or(Value::Null)
    }
}
