use crate::types::RangeError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// RangeType
///
/// SQL range type names understood by the catalog.
/// `AnyRange` is the polymorphic pseudo-type: it accepts every concrete range
/// type, and an aggregate declared over it resolves for any of them.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    AnyRange,
    Int8Range,
    DateRange,
    TstzRange,
}

impl RangeType {
    pub const ALL: [Self; 4] = [
        Self::AnyRange,
        Self::Int8Range,
        Self::DateRange,
        Self::TstzRange,
    ];

    /// SQL spelling of this type.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::AnyRange => "anyrange",
            Self::Int8Range => "int8range",
            Self::DateRange => "daterange",
            Self::TstzRange => "tstzrange",
        }
    }

    #[must_use]
    pub const fn is_polymorphic(self) -> bool {
        matches!(self, Self::AnyRange)
    }

    /// Whether a parameter declared as `self` accepts an argument of `concrete`.
    #[must_use]
    pub const fn accepts(self, concrete: Self) -> bool {
        self.is_polymorphic() || self as u8 == concrete as u8
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for RangeType {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|ty| ty.sql_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RangeError::UnknownType {
                name: wanted.to_string(),
            })
    }
}
