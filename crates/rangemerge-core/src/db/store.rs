use crate::{
    db::entity::{EntityKind, TableSchema},
    error::InternalError,
    value::Value,
};
use std::collections::BTreeMap;

///
/// Row
///
/// Column values of one stored entity, keyed by column name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row {
    values: BTreeMap<&'static str, Value>,
}

impl Row {
    /// Value stored in `column`, if the column exists.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

///
/// Table
///
/// Rows of one entity type, ordered by primary key.
///

#[derive(Clone, Debug)]
pub struct Table {
    schema: TableSchema,
    rows: BTreeMap<Value, Row>,
}

impl Table {
    #[must_use]
    pub const fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Build a row from `entity` and store it. Column types are checked and
    /// the primary key must be non-null and unused.
    pub(crate) fn insert<E: EntityKind>(&mut self, entity: &E) -> Result<(), InternalError> {
        let mut values = BTreeMap::new();
        for column in self.schema.columns {
            let value = entity.field_value(column.name).unwrap_or(Value::Null);
            if !column.ty.accepts(&value) {
                return Err(InternalError::executor_invalid(format!(
                    "column \"{}\" is of type {} but expression is of type {}",
                    column.name,
                    column.ty,
                    value.type_name()
                )));
            }
            values.insert(column.name, value);
        }

        let key = entity.key();
        if key.is_null() {
            return Err(InternalError::executor_invalid(format!(
                "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                self.schema.primary_key, self.schema.name
            )));
        }
        if self.rows.contains_key(&key) {
            return Err(InternalError::executor_conflict(format!(
                "duplicate key value violates unique constraint \"{}_pkey\"",
                self.schema.name
            )));
        }

        self.rows.insert(key, Row { values });

        Ok(())
    }
}
