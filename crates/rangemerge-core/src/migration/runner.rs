use crate::{
    migration::{
        MigrationError, MigrationId, MigrationLedger, MigrationSet, MigrationTarget, PlanStep,
        SchemaExecutor,
    },
    obs::sink::{self, MetricsEvent},
};
use chrono::Utc;
use tracing::{error, info, warn};

///
/// MigrationReport
///
/// What one run changed, in execution order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MigrationReport {
    pub applied: Vec<MigrationId>,
    pub reverted: Vec<MigrationId>,
    pub fake: bool,
}

impl MigrationReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty() && self.reverted.is_empty()
    }
}

///
/// MigrationRunner
///
/// Moves a database between migration states. Statements of one migration
/// run in order; the first failure stops the run with that migration left
/// unrecorded. Migrations completed earlier in the same run stay recorded.
///

pub struct MigrationRunner<'a, X: SchemaExecutor> {
    set: &'a MigrationSet,
    executor: &'a mut X,
    fake: bool,
}

impl<'a, X: SchemaExecutor> MigrationRunner<'a, X> {
    pub const fn new(set: &'a MigrationSet, executor: &'a mut X) -> Self {
        Self {
            set,
            executor,
            fake: false,
        }
    }

    /// Record migrations in the ledger without executing their statements.
    #[must_use]
    pub const fn fake(mut self, fake: bool) -> Self {
        self.fake = fake;
        self
    }

    /// Apply or unapply whatever is needed to reach `target`.
    pub fn migrate(
        &mut self,
        ledger: &mut MigrationLedger,
        target: &MigrationTarget,
    ) -> Result<MigrationReport, MigrationError> {
        let set = self.set;
        let steps = set.plan(ledger, target)?;
        let mut report = MigrationReport {
            fake: self.fake,
            ..MigrationReport::default()
        };

        if steps.is_empty() {
            info!("no migrations to apply");
        }

        for step in steps {
            self.run_step(step)?;

            let id = step.migration.id.clone();
            if step.backwards {
                ledger.remove(&id);
                report.reverted.push(id);
            } else {
                ledger.record(id.clone(), Utc::now(), self.fake);
                report.applied.push(id);
            }
        }

        Ok(report)
    }

    /// Unapply every migration of `app`, along with anything depending on it.
    pub fn rollback(
        &mut self,
        ledger: &mut MigrationLedger,
        app: &str,
    ) -> Result<MigrationReport, MigrationError> {
        self.migrate(
            ledger,
            &MigrationTarget::Zero {
                app: app.to_string(),
            },
        )
    }

    fn run_step(&mut self, step: PlanStep<'_>) -> Result<(), MigrationError> {
        let migration = step.migration;
        let id = &migration.id;
        let verb = if step.backwards { "Unapply" } else { "Apply" };

        if self.fake {
            warn!(migration = %id, backwards = step.backwards, "faking migration");
        } else {
            let statements = if step.backwards {
                migration
                    .reverse_statements()
                    .ok_or_else(|| MigrationError::Irreversible(id.clone()))?
            } else {
                migration.forward_statements()
            };

            self.executor.annotate(&format!("{verb} {id}"));
            for statement in statements {
                if let Err(source) = self.executor.execute(statement) {
                    error!(migration = %id, error = %source, "migration failed");
                    sink::record(MetricsEvent::MigrationFailed);

                    return Err(MigrationError::Statement {
                        id: id.clone(),
                        source,
                    });
                }
            }
        }

        if step.backwards {
            info!(migration = %id, fake = self.fake, "migration unapplied");
            sink::record(MetricsEvent::MigrationReverted { fake: self.fake });
        } else {
            info!(migration = %id, fake = self.fake, "migration applied");
            sink::record(MetricsEvent::MigrationApplied { fake: self.fake });
        }

        Ok(())
    }
}
