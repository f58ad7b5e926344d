use crate::types::{Range, RangeError, RangeType};
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Display, From};
use std::cmp::Ordering;

///
/// RangeValue
///
/// Type-erased range over one of the supported element types. This is what
/// a `range_merge(anyrange)` aggregate receives from a range column.
///

#[derive(Clone, Debug, Display, Eq, From, Hash, PartialEq)]
pub enum RangeValue {
    Int8(Range<i64>),
    Date(Range<NaiveDate>),
    Tstz(Range<DateTime<Utc>>),
}

impl RangeValue {
    #[must_use]
    pub const fn range_type(&self) -> RangeType {
        match self {
            Self::Int8(_) => RangeType::Int8Range,
            Self::Date(_) => RangeType::DateRange,
            Self::Tstz(_) => RangeType::TstzRange,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Int8(range) => range.is_empty(),
            Self::Date(range) => range.is_empty(),
            Self::Tstz(range) => range.is_empty(),
        }
    }

    #[must_use]
    pub const fn as_int8(&self) -> Option<&Range<i64>> {
        match self {
            Self::Int8(range) => Some(range),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<&Range<NaiveDate>> {
        match self {
            Self::Date(range) => Some(range),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_tstz(&self) -> Option<&Range<DateTime<Utc>>> {
        match self {
            Self::Tstz(range) => Some(range),
            _ => None,
        }
    }

    /// Parse a range literal as the given concrete range type.
    pub fn parse(range_type: RangeType, text: &str) -> Result<Self, RangeError> {
        match range_type {
            RangeType::Int8Range => text.parse().map(Self::Int8),
            RangeType::DateRange => text.parse().map(Self::Date),
            RangeType::TstzRange => text.parse().map(Self::Tstz),
            RangeType::AnyRange => Err(RangeError::Parse {
                input: text.to_string(),
                reason: format!("{range_type} is polymorphic; a concrete range type is required"),
            }),
        }
    }

    /// Step function over type-erased ranges. Both sides must share one
    /// concrete range type.
    pub fn merge(&self, other: &Self) -> Result<Self, RangeError> {
        match (self, other) {
            (Self::Int8(a), Self::Int8(b)) => Ok(Self::Int8(a.merge(b))),
            (Self::Date(a), Self::Date(b)) => Ok(Self::Date(a.merge(b))),
            (Self::Tstz(a), Self::Tstz(b)) => Ok(Self::Tstz(a.merge(b))),
            _ => Err(RangeError::TypeMismatch {
                left: self.range_type(),
                right: other.range_type(),
            }),
        }
    }
}

impl Ord for RangeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int8(a), Self::Int8(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Tstz(a), Self::Tstz(b)) => a.cmp(b),
            _ => self.range_type().cmp(&other.range_type()),
        }
    }
}

impl PartialOrd for RangeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
