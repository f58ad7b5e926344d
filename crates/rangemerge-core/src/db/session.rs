use crate::{
    db::{
        catalog::{Catalog, DdlOutcome},
        entity::{EntityKind, TableSchema},
        executor::execute_aggregate,
        query::{AggregateQuery, QueryError},
        response::AggregateResponse,
        store::Table,
    },
    error::InternalError,
    migration::SchemaExecutor,
    obs::sink::{self, MetricsEvent},
    schema::Statement,
};
use std::collections::BTreeMap;
use tracing::debug;

///
/// MemoryDb
///
/// In-memory database: an aggregate catalog plus entity tables. Single
/// threaded; callers borrow it mutably for DDL and inserts.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryDb {
    catalog: Catalog,
    tables: BTreeMap<&'static str, Table>,
}

impl MemoryDb {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            tables: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Create the table backing `E`.
    pub fn create_table<E: EntityKind>(&mut self) -> Result<(), InternalError> {
        if self.tables.contains_key(E::TABLE) {
            return Err(InternalError::catalog_conflict(format!(
                "relation \"{}\" already exists",
                E::TABLE
            )));
        }

        self.tables
            .insert(E::TABLE, Table::new(TableSchema::for_entity::<E>()));

        Ok(())
    }

    pub fn insert<E: EntityKind>(&mut self, entity: &E) -> Result<(), InternalError> {
        let table = self.tables.get_mut(E::TABLE).ok_or_else(|| {
            InternalError::catalog_not_found(format!("relation \"{}\" does not exist", E::TABLE))
        })?;

        table.insert(entity)
    }

    /// Apply one DDL statement to the catalog.
    pub fn execute_ddl(&mut self, statement: &Statement) -> Result<DdlOutcome, InternalError> {
        let outcome = match statement {
            Statement::CreateAggregate {
                or_replace,
                definition,
            } => self.catalog.create_aggregate(definition, *or_replace)?,
            Statement::DropAggregate {
                if_exists,
                signature,
            } => self.catalog.drop_aggregate(signature, *if_exists)?,
        };

        debug!(kind = statement.kind(), outcome = outcome.label(), "statement executed");
        sink::record(MetricsEvent::StatementExecuted {
            kind: statement.kind(),
        });

        Ok(outcome)
    }

    /// Parse and apply one DDL statement.
    pub fn execute_sql(&mut self, sql: &str) -> Result<DdlOutcome, InternalError> {
        let statement = Statement::parse(sql)?;

        self.execute_ddl(&statement)
    }

    /// Evaluate an aggregate query.
    pub fn aggregate(&self, query: &AggregateQuery) -> Result<AggregateResponse, QueryError> {
        let table = self
            .tables
            .get(query.table.as_str())
            .ok_or_else(|| QueryError::UnknownTable(query.table.clone()))?;

        execute_aggregate(&self.catalog, table, query)
    }
}

impl SchemaExecutor for MemoryDb {
    fn execute(&mut self, statement: &Statement) -> Result<(), InternalError> {
        self.execute_ddl(statement).map(|_| ())
    }
}
