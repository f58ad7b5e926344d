use crate::types::Range;

///
/// RangeMergeState
///
/// Accumulator for one aggregation group. Starts absent; the first input
/// becomes the state and every later input is merged into it. Absent inputs
/// are skipped, matching a strict step function.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeMergeState<T> {
    acc: Option<Range<T>>,
    rows: u64,
}

impl<T> RangeMergeState<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { acc: None, rows: 0 }
    }

    /// Number of present inputs folded so far.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    #[must_use]
    pub const fn peek(&self) -> Option<&Range<T>> {
        self.acc.as_ref()
    }

    /// Final aggregate value; `None` when no input was folded.
    #[must_use]
    pub fn finish(self) -> Option<Range<T>> {
        self.acc
    }
}

impl<T: Clone + Ord> RangeMergeState<T> {
    pub fn push(&mut self, next: Range<T>) {
        self.acc = Some(match self.acc.take() {
            Some(acc) => acc.merge(&next),
            None => next,
        });
        self.rows = self.rows.saturating_add(1);
    }

    pub fn push_opt(&mut self, next: Option<Range<T>>) {
        if let Some(next) = next {
            self.push(next);
        }
    }

    /// Combine a partial state computed over another slice of the group.
    pub fn merge_state(&mut self, other: Self) {
        self.rows = self.rows.saturating_add(other.rows);
        if let Some(other) = other.acc {
            self.acc = Some(match self.acc.take() {
                Some(acc) => acc.merge(&other),
                None => other,
            });
        }
    }
}

impl<T> Default for RangeMergeState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord> Extend<Range<T>> for RangeMergeState<T> {
    fn extend<I: IntoIterator<Item = Range<T>>>(&mut self, iter: I) {
        for range in iter {
            self.push(range);
        }
    }
}

impl<T: Clone + Ord> FromIterator<Range<T>> for RangeMergeState<T> {
    fn from_iter<I: IntoIterator<Item = Range<T>>>(iter: I) -> Self {
        let mut state = Self::new();
        state.extend(iter);
        state
    }
}

/// Fold a collection of ranges; zero inputs yield `None`.
pub fn range_merge_all<T, I>(ranges: I) -> Option<Range<T>>
where
    T: Clone + Ord,
    I: IntoIterator<Item = Range<T>>,
{
    ranges
        .into_iter()
        .collect::<RangeMergeState<T>>()
        .finish()
}
