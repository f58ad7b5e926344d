use crate::{
    db::{
        entity::{EntityKind, TableSchema},
        query::{Predicate, QueryError, quote_ident},
    },
    schema::{AggregateDefinition, QualifiedName},
};
use std::collections::BTreeSet;

///
/// AggregateExpr
///
/// One call of an installed aggregate over a single column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateExpr {
    pub aggregate: QualifiedName,
    pub field: String,
}

impl AggregateExpr {
    /// `range_merge(<field>)`
    pub fn range_merge(field: impl Into<String>) -> Self {
        Self {
            aggregate: QualifiedName::new(AggregateDefinition::RANGE_MERGE),
            field: field.into(),
        }
    }

    /// Call the aggregate `definition` installs, under whatever name it carries.
    pub fn call(definition: &AggregateDefinition, field: impl Into<String>) -> Self {
        Self {
            aggregate: definition.name.clone(),
            field: field.into(),
        }
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{}({})", self.aggregate, quote_ident(&self.field))
    }
}

///
/// AggregateQuery
///
/// `SELECT <group columns>, <aggregates> FROM <table> [WHERE ..] [GROUP BY ..]`
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateQuery {
    pub table: String,
    pub predicate: Option<Predicate>,
    pub group_by: Vec<String>,
    pub aggregates: Vec<(String, AggregateExpr)>,
}

impl AggregateQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            predicate: None,
            group_by: Vec::new(),
            aggregates: Vec::new(),
        }
    }

    #[must_use]
    pub fn for_entity<E: EntityKind>() -> Self {
        Self::new(E::TABLE)
    }

    /// Add a filter; repeated calls are ANDed together.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and_then(predicate),
            None => predicate,
        });
        self
    }

    /// Match no rows.
    #[must_use]
    pub fn none(mut self) -> Self {
        self.predicate = Some(Predicate::False);
        self
    }

    #[must_use]
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by.push(field.into());
        self
    }

    #[must_use]
    pub fn aggregate(mut self, alias: impl Into<String>, expr: AggregateExpr) -> Self {
        self.aggregates.push((alias.into(), expr));
        self
    }

    /// Check the query against a table shape: at least one aggregate,
    /// unique aliases, every referenced column present and every aggregated
    /// column a range.
    pub fn validate(&self, schema: &TableSchema) -> Result<(), QueryError> {
        if self.aggregates.is_empty() {
            return Err(QueryError::NoAggregates);
        }

        let mut aliases = BTreeSet::new();
        for (alias, _) in &self.aggregates {
            if !aliases.insert(alias.as_str()) {
                return Err(QueryError::DuplicateAlias(alias.clone()));
            }
        }

        let unknown = |field: &str| QueryError::UnknownField {
            table: schema.name.to_string(),
            field: field.to_string(),
        };

        let predicate_fields = self.predicate.iter().flat_map(Predicate::fields);
        for field in predicate_fields.chain(self.group_by.iter().map(String::as_str)) {
            if schema.column(field).is_none() {
                return Err(unknown(field));
            }
        }

        for (_, expr) in &self.aggregates {
            let column = schema.column(&expr.field).ok_or_else(|| unknown(&expr.field))?;
            if column.ty.range_type().is_none() {
                return Err(QueryError::NotRangeColumn {
                    function: expr.aggregate.to_string(),
                    field: expr.field.clone(),
                    ty: column.ty.sql_name(),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        let columns = self
            .group_by
            .iter()
            .map(|field| quote_ident(field))
            .chain(
                self.aggregates
                    .iter()
                    .map(|(alias, expr)| format!("{} AS {}", expr.to_sql(), quote_ident(alias))),
            )
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {columns} FROM {}", quote_ident(&self.table));
        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.to_sql());
        }
        if !self.group_by.is_empty() {
            let keys = self
                .group_by
                .iter()
                .map(|field| quote_ident(field))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" GROUP BY {keys} ORDER BY {keys}"));
        }

        sql
    }
}
