//! `rangemerge.toml` loading and validation.
//!
//! ```toml
//! [aggregate]
//! name = "range_merge"
//! schema = "public"
//! range_type = "anyrange"
//!
//! [ledger]
//! path = ".rangemerge/ledger.json"
//! ```
//!
//! Every key is optional; a missing file yields the defaults.

use rangemerge_core::{
    schema::{AggregateDefinition, validate_identifier},
    types::RangeType,
};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "rangemerge.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub aggregate: AggregateConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl Config {
    /// Load `path`. A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregate.validate()?;
        self.ledger.validate()
    }
}

///
/// AggregateConfig
///
/// Which aggregate the migrations install: its name, optional schema and
/// argument type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    #[serde(default = "default_aggregate_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default = "default_range_type")]
    pub range_type: RangeType,
}

impl AggregateConfig {
    /// The aggregate definition this configuration describes.
    #[must_use]
    pub fn definition(&self) -> AggregateDefinition {
        let definition = AggregateDefinition::range_merge(self.range_type).with_name(&self.name);

        match &self.schema {
            Some(schema) => definition.with_schema(schema),
            None => definition,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |err: rangemerge_core::error::InternalError| {
            ConfigError::Invalid(format!("aggregate: {}", err.message))
        };

        validate_identifier(&self.name).map_err(invalid)?;
        if let Some(schema) = &self.schema {
            validate_identifier(schema).map_err(invalid)?;
        }

        Ok(())
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            name: default_aggregate_name(),
            schema: None,
            range_type: default_range_type(),
        }
    }
}

fn default_aggregate_name() -> String {
    AggregateDefinition::RANGE_MERGE.to_string()
}

const fn default_range_type() -> RangeType {
    RangeType::AnyRange
}

///
/// LedgerConfig
///
/// Where the applied-migration ledger is kept.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl LedgerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("ledger: path must not be empty".into()));
        }

        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from(".rangemerge/ledger.json")
}

#[cfg(test)]
mod tests;
