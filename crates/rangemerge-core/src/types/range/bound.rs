use std::cmp::Ordering;

///
/// RangeBound
///
/// One end of a non-empty range. An unbounded end carries no inclusivity
/// flag; it always reads back as exclusive.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RangeBound<T> {
    Inclusive(T),
    Exclusive(T),
    Unbounded,
}

impl<T> RangeBound<T> {
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Inclusive(value) | Self::Exclusive(value) => Some(value),
            Self::Unbounded => None,
        }
    }

    #[must_use]
    pub const fn is_inclusive(&self) -> bool {
        matches!(self, Self::Inclusive(_))
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Map the bound value, keeping its inclusivity.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RangeBound<U> {
        match self {
            Self::Inclusive(value) => RangeBound::Inclusive(f(value)),
            Self::Exclusive(value) => RangeBound::Exclusive(f(value)),
            Self::Unbounded => RangeBound::Unbounded,
        }
    }
}

// Lower bounds: unbounded is -infinity, and on equal values the inclusive
// bound starts earlier.
pub(crate) fn cmp_lower<T: Ord>(a: &RangeBound<T>, b: &RangeBound<T>) -> Ordering {
    match (a, b) {
        (RangeBound::Unbounded, RangeBound::Unbounded) => Ordering::Equal,
        (RangeBound::Unbounded, _) => Ordering::Less,
        (_, RangeBound::Unbounded) => Ordering::Greater,
        (
            RangeBound::Inclusive(x) | RangeBound::Exclusive(x),
            RangeBound::Inclusive(y) | RangeBound::Exclusive(y),
        ) => x
            .cmp(y)
            .then_with(|| b.is_inclusive().cmp(&a.is_inclusive())),
    }
}

// Upper bounds: unbounded is +infinity, and on equal values the inclusive
// bound ends later.
pub(crate) fn cmp_upper<T: Ord>(a: &RangeBound<T>, b: &RangeBound<T>) -> Ordering {
    match (a, b) {
        (RangeBound::Unbounded, RangeBound::Unbounded) => Ordering::Equal,
        (RangeBound::Unbounded, _) => Ordering::Greater,
        (_, RangeBound::Unbounded) => Ordering::Less,
        (
            RangeBound::Inclusive(x) | RangeBound::Exclusive(x),
            RangeBound::Inclusive(y) | RangeBound::Exclusive(y),
        ) => x
            .cmp(y)
            .then_with(|| a.is_inclusive().cmp(&b.is_inclusive())),
    }
}
