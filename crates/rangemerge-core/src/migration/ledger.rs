use crate::migration::{MigrationError, MigrationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// AppliedMigration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppliedMigration {
    pub id: MigrationId,
    pub applied_at: DateTime<Utc>,

    /// Recorded without running its statements.
    #[serde(default)]
    pub fake: bool,
}

///
/// MigrationLedger
///
/// Which migrations a database has applied, in application order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MigrationLedger {
    applied: Vec<AppliedMigration>,
}

impl MigrationLedger {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_applied(&self, id: &MigrationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &MigrationId) -> Option<&AppliedMigration> {
        self.applied.iter().find(|entry| &entry.id == id)
    }

    pub fn applied(&self) -> impl Iterator<Item = &AppliedMigration> {
        self.applied.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Record `id` as applied. Re-recording an applied id is a no-op.
    pub fn record(&mut self, id: MigrationId, applied_at: DateTime<Utc>, fake: bool) {
        if !self.is_applied(&id) {
            self.applied.push(AppliedMigration {
                id,
                applied_at,
                fake,
            });
        }
    }

    /// Forget `id`; returns whether it was recorded.
    pub fn remove(&mut self, id: &MigrationId) -> bool {
        let before = self.applied.len();
        self.applied.retain(|entry| &entry.id != id);

        self.applied.len() != before
    }

    pub fn to_json(&self) -> Result<String, MigrationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MigrationError> {
        Ok(serde_json::from_str(json)?)
    }
}
