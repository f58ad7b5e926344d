use crate::{
    db::query::{AggregateExpr, Predicate},
    schema::AggregateDefinition,
    value::Value,
};

///
/// FieldRef
///
/// Zero-cost wrapper around a static column name used in predicates and
/// aggregate expressions.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldRef(&'static str);

impl FieldRef {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Equality comparison. Comparing against NULL never matches.
    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        Predicate::Eq {
            field: self.0.to_string(),
            value: value.into(),
        }
    }

    /// Membership in a list of values. An empty list matches nothing.
    #[must_use]
    pub fn in_list<I, V>(self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In {
            field: self.0.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_null(self) -> Predicate {
        Predicate::IsNull {
            field: self.0.to_string(),
        }
    }

    /// `range_merge(<field>)`
    #[must_use]
    pub fn range_merge(self) -> AggregateExpr {
        AggregateExpr::range_merge(self.0)
    }

    /// Call the aggregate `definition` installs over this column.
    #[must_use]
    pub fn aggregate(self, definition: &AggregateDefinition) -> AggregateExpr {
        AggregateExpr::call(definition, self.0)
    }
}

impl AsRef<str> for FieldRef {
    fn as_ref(&self) -> &str {
        self.0
    }
}
