//! Module: db::catalog
//! Responsibility: engine-native step functions and the installed aggregates
//! keyed by signature.
//! Does not own: statement parsing or migration ordering.

use crate::{
    error::InternalError,
    obs::sink::{self, MetricsEvent},
    schema::{AggregateDefinition, AggregateSignature, QualifiedName},
    types::RangeType,
    value::RangeValue,
};
use std::collections::BTreeMap;
use tracing::info;

///
/// BuiltinFunction
///
/// Step functions the engine supplies natively. Aggregates reference these
/// by name; this system never defines its own step function in the catalog.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuiltinFunction {
    /// `range_merge(anyrange, anyrange) -> anyrange`
    RangeMerge,
}

impl BuiltinFunction {
    pub const ALL: [Self; 1] = [Self::RangeMerge];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RangeMerge => "range_merge",
        }
    }

    /// Declared type of both parameters and the result.
    #[must_use]
    pub const fn arg_type(self) -> RangeType {
        match self {
            Self::RangeMerge => RangeType::AnyRange,
        }
    }

    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }

    /// Apply one step: fold `next` into `state`.
    pub fn apply(self, state: &RangeValue, next: &RangeValue) -> Result<RangeValue, InternalError> {
        match self {
            Self::RangeMerge => state.merge(next).map_err(|err| {
                InternalError::executor_invariant(format!("{} step failed: {err}", self.name()))
            }),
        }
    }
}

///
/// DdlOutcome
///
/// What one DDL statement did to the catalog.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DdlOutcome {
    Created,
    Replaced,
    Dropped,
    /// `IF EXISTS` on an absent object; the engine reports a notice only.
    Skipped,
}

impl DdlOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Replaced => "replaced",
            Self::Dropped => "dropped",
            Self::Skipped => "skipped",
        }
    }
}

///
/// ResolvedAggregate
///
/// Aggregate selected for one concrete argument type, with its step function.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedAggregate {
    pub definition: AggregateDefinition,
    pub step: BuiltinFunction,
}

///
/// Catalog
///

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    aggregates: BTreeMap<AggregateSignature, AggregateDefinition>,
}

impl Catalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aggregates: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    #[must_use]
    pub fn contains(&self, signature: &AggregateSignature) -> bool {
        self.aggregates.contains_key(signature)
    }

    #[must_use]
    pub fn get(&self, signature: &AggregateSignature) -> Option<&AggregateDefinition> {
        self.aggregates.get(signature)
    }

    pub fn aggregates(&self) -> impl Iterator<Item = &AggregateDefinition> {
        self.aggregates.values()
    }

    /// Install an aggregate. Without `or_replace` an existing signature is a
    /// conflict; with it, the definition is replaced as long as the state
    /// type is unchanged.
    pub fn create_aggregate(
        &mut self,
        definition: &AggregateDefinition,
        or_replace: bool,
    ) -> Result<DdlOutcome, InternalError> {
        definition.validate()?;

        let step = BuiltinFunction::lookup(&definition.sfunc).ok_or_else(|| {
            InternalError::catalog_not_found(format!(
                "function {}({}, {}) does not exist",
                definition.sfunc, definition.stype, definition.arg_type
            ))
        })?;
        if !step.arg_type().accepts(definition.stype) {
            return Err(InternalError::catalog_unsupported(format!(
                "function {}({}) cannot carry {} state",
                step.name(),
                step.arg_type(),
                definition.stype
            )));
        }

        let signature = definition.signature();
        let outcome = match self.aggregates.get(&signature) {
            None => DdlOutcome::Created,
            Some(_) if !or_replace => {
                return Err(InternalError::catalog_conflict(format!(
                    "function \"{signature}\" already exists with same argument types"
                )));
            }
            Some(existing) if existing.stype != definition.stype => {
                return Err(InternalError::catalog_conflict(format!(
                    "cannot change return type of existing function \"{signature}\""
                )));
            }
            Some(_) => DdlOutcome::Replaced,
        };

        self.aggregates.insert(signature.clone(), definition.clone());
        info!(aggregate = %signature, outcome = outcome.label(), "aggregate installed");
        sink::record(MetricsEvent::AggregateInstalled {
            replaced: outcome == DdlOutcome::Replaced,
        });

        Ok(outcome)
    }

    /// Remove an aggregate. An absent aggregate is a no-op with `if_exists`
    /// and a not-found error without it.
    pub fn drop_aggregate(
        &mut self,
        signature: &AggregateSignature,
        if_exists: bool,
    ) -> Result<DdlOutcome, InternalError> {
        if self.aggregates.remove(signature).is_some() {
            info!(aggregate = %signature, "aggregate dropped");
            sink::record(MetricsEvent::AggregateDropped { skipped: false });

            return Ok(DdlOutcome::Dropped);
        }

        if !if_exists {
            return Err(InternalError::catalog_not_found(format!(
                "aggregate {signature} does not exist"
            )));
        }

        info!(aggregate = %signature, "aggregate does not exist, skipping");
        sink::record(MetricsEvent::AggregateDropped { skipped: true });

        Ok(DdlOutcome::Skipped)
    }

    /// Find the aggregate `name` applicable to a concrete argument type. An
    /// unqualified name matches in any schema. An exact signature wins over a
    /// polymorphic one.
    pub fn resolve(
        &self,
        name: &QualifiedName,
        arg_type: RangeType,
    ) -> Result<ResolvedAggregate, InternalError> {
        let mut candidates = self
            .aggregates
            .values()
            .filter(|definition| {
                definition.name.name == name.name
                    && (name.schema.is_none() || definition.name.schema == name.schema)
                    && definition.arg_type.accepts(arg_type)
            })
            .collect::<Vec<_>>();
        candidates.sort_by_key(|definition| definition.arg_type.is_polymorphic());

        let definition = candidates.first().ok_or_else(|| {
            InternalError::catalog_not_found(format!("function {name}({arg_type}) does not exist"))
        })?;
        let step = BuiltinFunction::lookup(&definition.sfunc).ok_or_else(|| {
            InternalError::executor_invariant(format!(
                "aggregate {} references unknown step function {}",
                definition.name, definition.sfunc
            ))
        })?;

        Ok(ResolvedAggregate {
            definition: (*definition).clone(),
            step,
        })
    }
}
