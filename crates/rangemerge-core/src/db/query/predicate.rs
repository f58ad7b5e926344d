use crate::{db::query::quote_ident, db::store::Row, value::Value};

static NULL: Value = Value::Null;

fn lookup<'a>(row: &'a Row, field: &str) -> &'a Value {
    row.get(field).unwrap_or(&NULL)
}

///
/// Predicate
///
/// Row filter. Evaluation follows SQL three-valued logic collapsed to
/// "matches or not": any comparison involving NULL does not match.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Eq { field: String, value: Value },
    In { field: String, values: Vec<Value> },
    IsNull { field: String },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    /// Conjoin with `other`, flattening nested `And`s.
    #[must_use]
    pub fn and_then(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, pred) | (pred, Self::True) => pred,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), pred) => {
                left.push(pred);
                Self::And(left)
            }
            (pred, Self::And(mut right)) => {
                right.insert(0, pred);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Every column name referenced by this predicate.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::True | Self::False => {}
            Self::And(preds) => preds.iter().for_each(|pred| pred.collect_fields(out)),
            Self::Eq { field, .. } | Self::In { field, .. } | Self::IsNull { field } => {
                out.push(field);
            }
        }
    }

    #[must_use]
    pub fn eval(&self, row: &Row) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::And(preds) => preds.iter().all(|pred| pred.eval(row)),
            Self::Eq { field, value } => {
                let actual = lookup(row, field);
                !actual.is_null() && !value.is_null() && actual == value
            }
            Self::In { field, values } => {
                let actual = lookup(row, field);
                !actual.is_null() && values.contains(actual)
            }
            Self::IsNull { field } => lookup(row, field).is_null(),
        }
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::True => "TRUE".to_string(),
            Self::False => "FALSE".to_string(),
            Self::And(preds) if preds.is_empty() => "TRUE".to_string(),
            Self::And(preds) => preds
                .iter()
                .map(|pred| match pred {
                    Self::And(inner) if inner.len() > 1 => format!("({})", pred.to_sql()),
                    _ => pred.to_sql(),
                })
                .collect::<Vec<_>>()
                .join(" AND "),
            Self::Eq { field, value } => {
                format!("{} = {}", quote_ident(field), value.to_sql_literal())
            }
            Self::In { values, .. } if values.is_empty() => "FALSE".to_string(),
            Self::In { field, values } => format!(
                "{} IN ({})",
                quote_ident(field),
                values
                    .iter()
                    .map(Value::to_sql_literal)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::IsNull { field } => format!("{} IS NULL", quote_ident(field)),
        }
    }
}
