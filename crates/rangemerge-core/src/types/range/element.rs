use crate::types::{RangeBound, RangeError, RangeType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Debug;

///
/// RangeElement
///
/// Ordered element type a range can span, together with the text codec used
/// by the range literal format and the concrete SQL range type it maps to.
///

pub trait RangeElement: Clone + Debug + Ord {
    const RANGE_TYPE: RangeType;

    /// Render one bound value in the engine's text format (unquoted).
    fn to_text(&self) -> String;

    /// Parse one bound value (already unquoted).
    fn parse_text(text: &str) -> Result<Self, String>;

    /// Rewrite bounds into the element's canonical form. Continuous elements
    /// keep them as given.
    fn canonicalize(
        lower: RangeBound<Self>,
        upper: RangeBound<Self>,
    ) -> Result<(RangeBound<Self>, RangeBound<Self>), RangeError> {
        Ok((lower, upper))
    }
}

// Discrete elements canonicalize to `[lower,upper)`: an exclusive lower bound
// and an inclusive upper bound both step to the successor.
fn discrete_canonical<T: RangeElement>(
    lower: RangeBound<T>,
    upper: RangeBound<T>,
    successor: impl Fn(&T) -> Option<T>,
) -> Result<(RangeBound<T>, RangeBound<T>), RangeError> {
    let step = |value: &T| {
        successor(value).ok_or(RangeError::BoundOutOfRange {
            range_type: T::RANGE_TYPE,
        })
    };

    let lower = match lower {
        RangeBound::Exclusive(value) => RangeBound::Inclusive(step(&value)?),
        other => other,
    };
    let upper = match upper {
        RangeBound::Inclusive(value) => RangeBound::Exclusive(step(&value)?),
        other => other,
    };

    Ok((lower, upper))
}

impl RangeElement for i64 {
    const RANGE_TYPE: RangeType = RangeType::Int8Range;

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn parse_text(text: &str) -> Result<Self, String> {
        text.trim()
            .parse()
            .map_err(|err| format!("invalid bigint \"{text}\": {err}"))
    }

    fn canonicalize(
        lower: RangeBound<Self>,
        upper: RangeBound<Self>,
    ) -> Result<(RangeBound<Self>, RangeBound<Self>), RangeError> {
        discrete_canonical(lower, upper, |value| value.checked_add(1))
    }
}

impl RangeElement for NaiveDate {
    const RANGE_TYPE: RangeType = RangeType::DateRange;

    fn to_text(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn parse_text(text: &str) -> Result<Self, String> {
        Self::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|err| format!("invalid date \"{text}\": {err}"))
    }

    fn canonicalize(
        lower: RangeBound<Self>,
        upper: RangeBound<Self>,
    ) -> Result<(RangeBound<Self>, RangeBound<Self>), RangeError> {
        discrete_canonical(lower, upper, Self::succ_opt)
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

impl RangeElement for DateTime<Utc> {
    const RANGE_TYPE: RangeType = RangeType::TstzRange;

    fn to_text(&self) -> String {
        format!("{}+00", self.format(TIMESTAMP_FORMAT))
    }

    fn parse_text(text: &str) -> Result<Self, String> {
        let text = text.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Ok(parsed.with_timezone(&Utc));
        }
        if let Some(naive) = text.strip_suffix("+00")
            && let Ok(parsed) = NaiveDateTime::parse_from_str(naive, TIMESTAMP_FORMAT)
        {
            return Ok(parsed.and_utc());
        }

        DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z")
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| format!("invalid timestamptz \"{text}\": {err}"))
    }
}
