//! Module: types::range
//! Responsibility: the range value type, its bounds, construction rules and
//! text form.
//! Does not own: the merge reduction (see `aggregate`).

mod bound;
mod element;
mod text;


use crate::types::RangeType;
use std::cmp::Ordering;
use thiserror::Error as ThisError;

pub use bound::RangeBound;
pub(crate) use bound::{cmp_lower, cmp_upper};
pub use element::RangeElement;

///
/// RangeError
///
/// Data-validation failures raised while constructing or decoding ranges.
/// The reduction itself never produces these for well-formed inputs.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RangeError {
    #[error("range lower bound must be less than or equal to range upper bound")]
    LowerAfterUpper,

    #[error("{range_type} bound is out of range")]
    BoundOutOfRange { range_type: RangeType },

    #[error("malformed range literal: \"{input}\": {reason}")]
    Parse { input: String, reason: String },

    #[error("range type mismatch: cannot merge {left} with {right}")]
    TypeMismatch { left: RangeType, right: RangeType },

    #[error("type \"{name}\" is not a known range type")]
    UnknownType { name: String },
}

///
/// Range
///
/// A contiguous span over an ordered element type, or the empty range.
///
/// Invariant: when present, the lower bound value is never greater than the
/// upper bound value, and equal bound values only survive as a point range
/// with both bounds inclusive. Every constructor enforces this.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Range<T> {
    bounds: Option<(RangeBound<T>, RangeBound<T>)>,
}

impl<T> Range<T> {
    /// The empty range.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bounds: None }
    }

    /// The range covering every element, `(,)`.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            bounds: Some((RangeBound::Unbounded, RangeBound::Unbounded)),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    #[must_use]
    pub const fn lower_bound(&self) -> Option<&RangeBound<T>> {
        match &self.bounds {
            Some((lower, _)) => Some(lower),
            None => None,
        }
    }

    #[must_use]
    pub const fn upper_bound(&self) -> Option<&RangeBound<T>> {
        match &self.bounds {
            Some((_, upper)) => Some(upper),
            None => None,
        }
    }

    /// Lower bound value; absent for empty ranges and unbounded lower ends.
    #[must_use]
    pub const fn lower(&self) -> Option<&T> {
        match self.lower_bound() {
            Some(bound) => bound.value(),
            None => None,
        }
    }

    /// Upper bound value; absent for empty ranges and unbounded upper ends.
    #[must_use]
    pub const fn upper(&self) -> Option<&T> {
        match self.upper_bound() {
            Some(bound) => bound.value(),
            None => None,
        }
    }

    #[must_use]
    pub const fn lower_inc(&self) -> bool {
        matches!(self.bounds, Some((RangeBound::Inclusive(_), _)))
    }

    #[must_use]
    pub const fn upper_inc(&self) -> bool {
        matches!(self.bounds, Some((_, RangeBound::Inclusive(_))))
    }

    #[must_use]
    pub const fn lower_inf(&self) -> bool {
        matches!(self.bounds, Some((RangeBound::Unbounded, _)))
    }

    #[must_use]
    pub const fn upper_inf(&self) -> bool {
        matches!(self.bounds, Some((_, RangeBound::Unbounded)))
    }

    // Caller guarantees the ordering invariant.
    pub(crate) const fn from_bounds_unchecked(lower: RangeBound<T>, upper: RangeBound<T>) -> Self {
        Self {
            bounds: Some((lower, upper)),
        }
    }
}

impl<T: RangeElement> Range<T> {
    /// Build a range from two bounds, applying the engine's construction rules:
    /// reject inverted bounds, canonicalize discrete elements to `[lower,upper)`,
    /// then collapse anything covering no element to empty.
    pub fn new(lower: RangeBound<T>, upper: RangeBound<T>) -> Result<Self, RangeError> {
        if let (Some(lo), Some(hi)) = (lower.value(), upper.value())
            && lo > hi
        {
            return Err(RangeError::LowerAfterUpper);
        }

        let (lower, upper) = T::canonicalize(lower, upper)?;
        if let (Some(lo), Some(hi)) = (lower.value(), upper.value()) {
            match lo.cmp(hi) {
                Ordering::Greater => return Ok(Self::empty()),
                Ordering::Equal if !(lower.is_inclusive() && upper.is_inclusive()) => {
                    return Ok(Self::empty());
                }
                _ => {}
            }
        }

        Ok(Self::from_bounds_unchecked(lower, upper))
    }

    /// `[lower,upper)`
    pub fn closed_open(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(RangeBound::Inclusive(lower), RangeBound::Exclusive(upper))
    }

    /// `[lower,upper]`
    pub fn closed(lower: T, upper: T) -> Result<Self, RangeError> {
        Self::new(RangeBound::Inclusive(lower), RangeBound::Inclusive(upper))
    }
}

// Engine ordering: empty sorts first, then by lower bound, then by upper bound.
impl<T: Ord> Ord for Range<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.bounds, &other.bounds) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => {
                cmp_lower(a_lo, b_lo).then_with(|| cmp_upper(a_hi, b_hi))
            }
        }
    }
}

impl<T: Ord> PartialOrd for Range<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
