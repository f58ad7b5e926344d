use crate::migration::MigrationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// MigrationId
///
/// `<app>.<name>`, e.g. `range_merge.0001_initial`. Names within one app
/// conventionally carry a zero-padded sequence prefix.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MigrationId {
    pub app: String,
    pub name: String,
}

impl MigrationId {
    pub fn new(app: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app, self.name)
    }
}

impl FromStr for MigrationId {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((app, name)) if !app.is_empty() && !name.is_empty() && !name.contains('.') => {
                Ok(Self::new(app, name))
            }
            _ => Err(MigrationError::InvalidId(s.to_string())),
        }
    }
}
