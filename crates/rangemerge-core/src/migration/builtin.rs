//! Migrations shipped with the `range_merge` aggregate.

use crate::{
    migration::{Migration, MigrationError, MigrationId, MigrationSet, Operation},
    schema::AggregateDefinition,
};

/// App label of the bundled migrations.
pub const APP: &str = "range_merge";

/// Name of the migration installing the aggregate.
pub const INITIAL: &str = "0001_initial";

#[must_use]
pub fn initial_id() -> MigrationId {
    MigrationId::new(APP, INITIAL)
}

/// `0001_initial`: install `definition` forward, remove it backward. No
/// dependencies and no data changes.
#[must_use]
pub fn range_merge_migration(definition: &AggregateDefinition) -> Migration {
    Migration::new(APP, INITIAL)
        .initial(true)
        .operation(Operation::RunSql {
            forward: vec![definition.install()],
            reverse: Some(vec![definition.remove()]),
        })
}

/// The bundled migration set for `definition`.
pub fn range_merge_migrations(
    definition: &AggregateDefinition,
) -> Result<MigrationSet, MigrationError> {
    let mut set = MigrationSet::new();
    set.register(range_merge_migration(definition))?;

    Ok(set)
}
