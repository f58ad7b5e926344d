use crate::migration::{Migration, MigrationError, MigrationId, MigrationLedger};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

///
/// MigrationTarget
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MigrationTarget {
    /// Every registered migration applied.
    Latest,

    /// Nothing of `app` applied, nor anything depending on it.
    Zero { app: String },

    /// Exactly up to this migration within its app: ancestors applied,
    /// later migrations of the app (and their dependents) unapplied.
    Migration(MigrationId),
}

///
/// PlanStep
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlanStep<'a> {
    pub migration: &'a Migration,
    pub backwards: bool,
}

///
/// MigrationSet
///
/// Registered migrations and their dependency graph.
///

#[derive(Clone, Debug, Default)]
pub struct MigrationSet {
    migrations: BTreeMap<MigrationId, Migration>,
}

impl MigrationSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            migrations: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, migration: Migration) -> Result<(), MigrationError> {
        if self.migrations.contains_key(&migration.id) {
            return Err(MigrationError::DuplicateMigration(migration.id));
        }
        self.migrations.insert(migration.id.clone(), migration);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &MigrationId) -> Option<&Migration> {
        self.migrations.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Migrations in dependency order. Ties break on id, so the order is
    /// stable across runs.
    pub fn ordered(&self) -> Result<Vec<&Migration>, MigrationError> {
        let mut pending = BTreeMap::new();
        let mut dependents: BTreeMap<&MigrationId, Vec<&MigrationId>> = BTreeMap::new();

        for migration in self.migrations.values() {
            for dependency in &migration.dependencies {
                if !self.migrations.contains_key(dependency) {
                    return Err(MigrationError::UnknownDependency {
                        migration: migration.id.clone(),
                        dependency: dependency.clone(),
                    });
                }
                dependents.entry(dependency).or_default().push(&migration.id);
            }
            let unique = migration.dependencies.iter().collect::<BTreeSet<_>>();
            pending.insert(&migration.id, unique.len());
        }

        let mut ready = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect::<BTreeSet<_>>();
        let mut out = Vec::with_capacity(self.migrations.len());

        while let Some(id) = ready.pop_first() {
            pending.remove(id);
            if let Some(migration) = self.migrations.get(id) {
                out.push(migration);
            }

            let mut seen = BTreeSet::new();
            for dependent in dependents.get(id).into_iter().flatten() {
                if !seen.insert(*dependent) {
                    continue;
                }
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        if !pending.is_empty() {
            return Err(MigrationError::DependencyCycle(
                pending.into_keys().cloned().collect(),
            ));
        }

        Ok(out)
    }

    /// Fail when an applied migration has an unapplied dependency. Applied
    /// ids this set does not know are ignored with a warning.
    pub fn check_consistency(&self, ledger: &MigrationLedger) -> Result<(), MigrationError> {
        for entry in ledger.applied() {
            let Some(migration) = self.migrations.get(&entry.id) else {
                warn!(migration = %entry.id, "ledger records an unknown migration");
                continue;
            };

            if let Some(dependency) = migration
                .dependencies
                .iter()
                .find(|dependency| !ledger.is_applied(dependency))
            {
                return Err(MigrationError::InconsistentHistory {
                    migration: migration.id.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        Ok(())
    }

    /// Steps that move `ledger` to `target`. Forward steps run in dependency
    /// order; backward steps run dependents first.
    pub fn plan(
        &self,
        ledger: &MigrationLedger,
        target: &MigrationTarget,
    ) -> Result<Vec<PlanStep<'_>>, MigrationError> {
        let ordered = self.ordered()?;
        self.check_consistency(ledger)?;

        let (selected, backwards): (BTreeSet<&MigrationId>, bool) = match target {
            MigrationTarget::Latest => (self.migrations.keys().collect(), false),
            MigrationTarget::Zero { app } => {
                let roots = self.app_migrations(app)?;
                (self.descendants(roots), true)
            }
            MigrationTarget::Migration(id) => {
                if !self.migrations.contains_key(id) {
                    return Err(MigrationError::UnknownMigration(id.clone()));
                }
                if ledger.is_applied(id) {
                    let later = self
                        .migrations
                        .values()
                        .filter(|migration| {
                            migration.id.app == id.app && migration.dependencies.contains(id)
                        })
                        .map(|migration| &migration.id)
                        .collect::<Vec<_>>();
                    (self.descendants(later), true)
                } else {
                    (self.ancestors(id), false)
                }
            }
        };

        let steps = if backwards {
            ordered
                .into_iter()
                .rev()
                .filter(|migration| {
                    selected.contains(&migration.id) && ledger.is_applied(&migration.id)
                })
                .map(|migration| {
                    if migration.is_reversible() {
                        Ok(PlanStep {
                            migration,
                            backwards: true,
                        })
                    } else {
                        Err(MigrationError::Irreversible(migration.id.clone()))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            ordered
                .into_iter()
                .filter(|migration| {
                    selected.contains(&migration.id) && !ledger.is_applied(&migration.id)
                })
                .map(|migration| PlanStep {
                    migration,
                    backwards: false,
                })
                .collect()
        };

        Ok(steps)
    }

    fn app_migrations(&self, app: &str) -> Result<Vec<&MigrationId>, MigrationError> {
        let ids = self
            .migrations
            .keys()
            .filter(|id| id.app == app)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Err(MigrationError::UnknownApp(app.to_string()));
        }

        Ok(ids)
    }

    // `id` and everything it transitively depends on.
    fn ancestors<'a>(&'a self, id: &'a MigrationId) -> BTreeSet<&'a MigrationId> {
        let mut out = BTreeSet::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if out.insert(next)
                && let Some(migration) = self.migrations.get(next)
            {
                stack.extend(&migration.dependencies);
            }
        }

        out
    }

    // `roots` and everything transitively depending on any of them.
    fn descendants<'a>(&'a self, roots: Vec<&'a MigrationId>) -> BTreeSet<&'a MigrationId> {
        let mut out = BTreeSet::new();
        let mut stack = roots;
        while let Some(next) = stack.pop() {
            if out.insert(next) {
                stack.extend(
                    self.migrations
                        .values()
                        .filter(|migration| migration.dependencies.contains(next))
                        .map(|migration| &migration.id),
                );
            }
        }

        out
    }
}
