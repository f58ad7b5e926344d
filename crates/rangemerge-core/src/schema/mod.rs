//! Module: schema
//! Responsibility: aggregate definitions and the DDL statements that install
//! and remove them, rendered to SQL and parsed back.
//! Does not own: applying statements (see `db::Catalog`) or ordering them
//! (see `migration`).

mod aggregate;
mod parse;
mod statement;

#[cfg(test)]
mod tests;

use crate::error::InternalError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use aggregate::{AggregateDefinition, AggregateSignature};
pub use statement::Statement;

/// Longest identifier the engine keeps without truncation.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Validate an unquoted SQL identifier: lowercase ASCII letters, digits and
/// underscores, not starting with a digit.
pub fn validate_identifier(ident: &str) -> Result<(), InternalError> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err(InternalError::schema_invalid("identifier must not be empty"));
    };

    if ident.len() > MAX_IDENTIFIER_LEN {
        return Err(InternalError::schema_invalid(format!(
            "identifier \"{ident}\" exceeds {MAX_IDENTIFIER_LEN} bytes"
        )));
    }
    if !(first.is_ascii_lowercase() || first == '_')
        || !chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
    {
        return Err(InternalError::schema_invalid(format!(
            "invalid identifier \"{ident}\": expected lowercase letters, digits or underscores"
        )));
    }

    Ok(())
}

///
/// QualifiedName
///
/// Optionally schema-qualified object name, e.g. `public.range_merge`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct QualifiedName {
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        if let Some(schema) = &self.schema {
            validate_identifier(schema)?;
        }

        validate_identifier(&self.name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
