use crate::value::{RangeValue, Value};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized aggregate response.
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one ungrouped row, found {count}")]
    NotScalar { count: usize },

    #[error("no aggregate output named \"{alias}\"")]
    UnknownAlias { alias: String },
}

///
/// AggregateRow
///
/// One output row: the group key values (empty without GROUP BY) and one
/// merged value per aggregate alias. `None` is SQL NULL.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateRow {
    pub group: Vec<Value>,
    pub values: BTreeMap<String, Option<RangeValue>>,
}

impl AggregateRow {
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&RangeValue> {
        self.values.get(alias).and_then(Option::as_ref)
    }
}

///
/// AggregateResponse
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AggregateResponse {
    rows: Vec<AggregateRow>,
}

impl AggregateResponse {
    #[must_use]
    pub const fn new(rows: Vec<AggregateRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The single value of `alias` in an ungrouped response.
    pub fn scalar(&self, alias: &str) -> Result<Option<RangeValue>, ResponseError> {
        let [row] = self.rows.as_slice() else {
            return Err(ResponseError::NotScalar {
                count: self.rows.len(),
            });
        };
        if !row.group.is_empty() {
            return Err(ResponseError::NotScalar { count: 1 });
        }

        row.values
            .get(alias)
            .cloned()
            .ok_or_else(|| ResponseError::UnknownAlias {
                alias: alias.to_string(),
            })
    }
}
