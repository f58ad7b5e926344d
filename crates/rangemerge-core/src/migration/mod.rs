//! Module: migration
//! Responsibility: versioned schema migrations, their dependency graph, the
//! ledger of applied migrations and the runner that moves a database between
//! states.
//! Does not own: statement text (see `schema`) or how a statement is applied
//! (see `SchemaExecutor` implementors).

pub mod builtin;
mod error;
mod executor;
mod id;
mod ledger;
mod plan;
mod runner;


use crate::schema::Statement;

pub use error::MigrationError;
pub use executor::{SchemaExecutor, ScriptExecutor};
pub use id::MigrationId;
pub use ledger::{AppliedMigration, MigrationLedger};
pub use plan::{MigrationSet, MigrationTarget, PlanStep};
pub use runner::{MigrationReport, MigrationRunner};

///
/// Operation
///
/// One unit of work inside a migration. `reverse: None` marks the operation
/// irreversible.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    RunSql {
        forward: Vec<Statement>,
        reverse: Option<Vec<Statement>>,
    },
}

///
/// Migration
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Migration {
    pub id: MigrationId,
    pub dependencies: Vec<MigrationId>,
    pub initial: bool,
    pub operations: Vec<Operation>,
}

impl Migration {
    pub fn new(app: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MigrationId::new(app, name),
            dependencies: Vec::new(),
            initial: false,
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn initial(mut self, initial: bool) -> Self {
        self.initial = initial;
        self
    }

    #[must_use]
    pub fn depends_on(mut self, dependency: MigrationId) -> Self {
        self.dependencies.push(dependency);
        self
    }

    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Statements applied when migrating forward, in order.
    #[must_use]
    pub fn forward_statements(&self) -> Vec<&Statement> {
        self.operations
            .iter()
            .flat_map(|Operation::RunSql { forward, .. }| forward)
            .collect()
    }

    /// Statements applied when unapplying, in order: operations are undone
    /// last-first. `None` when any operation is irreversible.
    #[must_use]
    pub fn reverse_statements(&self) -> Option<Vec<&Statement>> {
        let mut out = Vec::new();
        for Operation::RunSql { reverse, .. } in self.operations.iter().rev() {
            out.extend(reverse.as_ref()?);
        }

        Some(out)
    }

    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.reverse_statements().is_some()
    }
}
