use crate::{
    db::{ColumnDef, ColumnType, EntityKind, query::FieldRef},
    types::{Range, RangeType},
    value::Value,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TimeSlot
///
/// A named span of time, e.g. a booking or a shift.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TimeSlot {
    pub id: i64,
    pub name: String,
    pub time_range: Range<DateTime<Utc>>,
}

impl TimeSlot {
    pub const ID: FieldRef = FieldRef::new("id");
    pub const NAME: FieldRef = FieldRef::new("name");
    pub const TIME_RANGE: FieldRef = FieldRef::new("time_range");

    pub fn new(id: i64, name: impl Into<String>, time_range: Range<DateTime<Utc>>) -> Self {
        Self {
            id,
            name: name.into(),
            time_range,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.time_range)
    }
}

impl EntityKind for TimeSlot {
    const TABLE: &'static str = "time_slot";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("id", ColumnType::Int),
        ColumnDef::new("name", ColumnType::Text),
        ColumnDef::new("time_range", ColumnType::Range(RangeType::TstzRange)),
    ];

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Int(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "time_range" => Some(self.time_range.clone().into()),
            _ => None,
        }
    }
}
