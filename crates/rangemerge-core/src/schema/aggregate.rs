use crate::{
    error::InternalError,
    schema::{QualifiedName, Statement},
    types::RangeType,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// AggregateSignature
///
/// Name plus argument type: the identity of an aggregate in the catalog.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AggregateSignature {
    pub name: QualifiedName,
    pub arg_type: RangeType,
}

impl fmt::Display for AggregateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg_type)
    }
}

///
/// AggregateDefinition
///
/// Declaration of a database aggregate: its signature, the step function
/// applied per input row and the accumulator (state) type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregateDefinition {
    pub name: QualifiedName,
    pub arg_type: RangeType,
    pub sfunc: String,
    pub stype: RangeType,
}

impl AggregateDefinition {
    /// Name of both the aggregate and the engine-native step function.
    pub const RANGE_MERGE: &'static str = "range_merge";

    /// Canonical `range_merge` aggregate over `arg_type`, folding with the
    /// engine's `range_merge` step function and carrying the same type as
    /// its state.
    #[must_use]
    pub fn range_merge(arg_type: RangeType) -> Self {
        Self {
            name: QualifiedName::new(Self::RANGE_MERGE),
            arg_type,
            sfunc: Self::RANGE_MERGE.to_string(),
            stype: arg_type,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.name = self.name.with_schema(schema);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name.name = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        self.name.validate()?;
        crate::schema::validate_identifier(&self.sfunc)?;

        if !self.stype.accepts(self.arg_type) && !self.arg_type.accepts(self.stype) {
            return Err(InternalError::schema_invalid(format!(
                "aggregate {} cannot carry {} state for {} input",
                self.name, self.stype, self.arg_type
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn signature(&self) -> AggregateSignature {
        AggregateSignature {
            name: self.name.clone(),
            arg_type: self.arg_type,
        }
    }

    /// Forward statement: create-or-replace, safe to re-run.
    #[must_use]
    pub fn install(&self) -> Statement {
        Statement::CreateAggregate {
            or_replace: true,
            definition: self.clone(),
        }
    }

    /// Backward statement: drop-if-exists, a no-op when already absent.
    #[must_use]
    pub fn remove(&self) -> Statement {
        Statement::DropAggregate {
            if_exists: true,
            signature: self.signature(),
        }
    }
}
