use crate::{error::InternalError, migration::MigrationId};
use thiserror::Error as ThisError;

///
/// MigrationError
///
/// Failures while planning or running migrations. None of these are retried;
/// a failed run leaves the failing migration unrecorded.
///

#[derive(Debug, ThisError)]
pub enum MigrationError {
    #[error("invalid migration id \"{0}\": expected <app>.<name>")]
    InvalidId(String),

    #[error("migration {0} is not registered")]
    UnknownMigration(MigrationId),

    #[error("no migrations registered for app \"{0}\"")]
    UnknownApp(String),

    #[error("migration {0} is registered more than once")]
    DuplicateMigration(MigrationId),

    #[error("migration {migration} depends on unknown migration {dependency}")]
    UnknownDependency {
        migration: MigrationId,
        dependency: MigrationId,
    },

    #[error("dependency cycle among migrations: {}", join_ids(.0))]
    DependencyCycle(Vec<MigrationId>),

    #[error("migration {migration} is applied before its dependency {dependency}")]
    InconsistentHistory {
        migration: MigrationId,
        dependency: MigrationId,
    },

    #[error("migration {0} is not reversible")]
    Irreversible(MigrationId),

    #[error("migration {id} failed: {source}")]
    Statement {
        id: MigrationId,
        source: InternalError,
    },

    #[error("migration ledger is unreadable: {0}")]
    Ledger(#[from] serde_json::Error),
}

fn join_ids(ids: &[MigrationId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
