use crate::types::{Range, cmp_lower, cmp_upper};

impl<T: Clone + Ord> Range<T> {
    /// Smallest range spanning both inputs.
    ///
    /// The lower bound is the lesser of the two lower bounds and the upper
    /// bound the greater of the two upper bounds, each keeping the
    /// inclusivity of the side that supplied it. Gaps between the inputs are
    /// absorbed. An empty input contributes nothing.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let (Some(a_lo), Some(a_hi), Some(b_lo), Some(b_hi)) = (
            self.lower_bound(),
            self.upper_bound(),
            other.lower_bound(),
            other.upper_bound(),
        ) else {
            return if self.is_empty() {
                other.clone()
            } else {
                self.clone()
            };
        };

        let lower = if cmp_lower(a_lo, b_lo).is_le() { a_lo } else { b_lo };
        let upper = if cmp_upper(a_hi, b_hi).is_ge() { a_hi } else { b_hi };

        // Both inputs satisfy lower <= upper, so the envelope does too.
        Self::from_bounds_unchecked(lower.clone(), upper.clone())
    }
}

/// Step function with absent-value handling: an absent side yields the other.
#[must_use]
pub fn range_merge<T: Clone + Ord>(
    state: Option<Range<T>>,
    next: Option<Range<T>>,
) -> Option<Range<T>> {
    match (state, next) {
        (Some(state), Some(next)) => Some(state.merge(&next)),
        (state, None) => state,
        (None, next) => next,
    }
}
