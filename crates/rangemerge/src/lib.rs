//! ## Crate layout
//! - `core`: ranges, the `range_merge` reduction, aggregate DDL, migrations
//!   and the in-memory engine.
//! - `config`: `rangemerge.toml` loading and validation.
//! - `error`: the public error taxonomy every fallible helper here returns.
//!
//! The `prelude` module carries the domain vocabulary used to build queries
//! and fold ranges.

pub use rangemerge_config as config;
pub use rangemerge_core as core;

mod error;


pub use error::{Error, ErrorKind, ErrorOrigin, MigrationErrorKind, QueryErrorKind, SchemaErrorKind};

use crate::{
    config::Config,
    core::{
        migration::{MigrationSet, builtin},
        types::RangeType,
        value::RangeValue,
    },
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The bundled migrations for the aggregate `config` describes.
pub fn migrations(config: &Config) -> Result<MigrationSet, Error> {
    Ok(builtin::range_merge_migrations(&config.aggregate.definition())?)
}

/// Parse each literal as `range_type` and fold them with `range_merge`.
/// `None` when `literals` is empty.
pub fn merge_literals<S: AsRef<str>>(
    range_type: RangeType,
    literals: &[S],
) -> Result<Option<RangeValue>, Error> {
    let mut merged: Option<RangeValue> = None;
    for literal in literals {
        let next = RangeValue::parse(range_type, literal.as_ref())?;
        merged = Some(match merged {
            Some(current) => current.merge(&next)?,
            None => next,
        });
    }

    Ok(merged)
}

///
/// Prelude
///
/// Domain vocabulary only; errors and runners stay one module down.
///

pub mod prelude {
    pub use crate::core::{
        db::MemoryDb,
        model::TimeSlot,
        prelude::*,
    };
}
