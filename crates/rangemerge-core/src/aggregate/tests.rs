use super::*;
use crate::types::{Range, RangeBound};
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

fn slot(from: u32, to: u32) -> Range<DateTime<Utc>> {
    Range::closed_open(at(from), at(to)).unwrap()
}

#[test]
fn overlapping_ranges_merge_to_envelope() {
    let merged = range_merge_all([slot(8, 12), slot(11, 15), slot(14, 18)]);

    assert_eq!(merged, Some(slot(8, 18)));
}

#[test]
fn disjoint_ranges_merge_across_the_gap() {
    let merged = range_merge_all([slot(8, 10), slot(14, 16)]);

    assert_eq!(merged, Some(slot(8, 16)));
}

#[test]
fn adjacent_ranges_merge_into_one() {
    let merged = range_merge_all([slot(8, 12), slot(12, 16)]);

    assert_eq!(merged, Some(slot(8, 16)));
}

#[test]
fn single_range_is_returned_unchanged() {
    assert_eq!(range_merge_all([slot(8, 12)]), Some(slot(8, 12)));
}

#[test]
fn zero_ranges_yield_absent() {
    assert_eq!(range_merge_all(Vec::<Range<DateTime<Utc>>>::new()), None);
}

#[test]
fn absent_side_of_step_yields_other_side() {
    assert_eq!(range_merge(None, Some(slot(8, 12))), Some(slot(8, 12)));
    assert_eq!(range_merge(Some(slot(8, 12)), None), Some(slot(8, 12)));
    assert_eq!(range_merge::<i64>(None, None), None);
}

#[test]
fn empty_range_contributes_nothing() {
    let empty = Range::<i64>::empty();
    let range = Range::closed_open(2_i64, 6).unwrap();

    assert_eq!(empty.merge(&range), range);
    assert_eq!(range.merge(&empty), range);
    assert!(empty.merge(&Range::empty()).is_empty());
}

#[test]
fn inclusivity_comes_from_the_side_supplying_the_extremum() {
    let left = Range::new(RangeBound::Exclusive(at(1)), RangeBound::Inclusive(at(5))).unwrap();
    let right = Range::new(RangeBound::Inclusive(at(3)), RangeBound::Exclusive(at(9))).unwrap();
    let merged = left.merge(&right);

    assert!(!merged.lower_inc());
    assert!(!merged.upper_inc());
    assert_eq!(merged.lower(), Some(&at(1)));
    assert_eq!(merged.upper(), Some(&at(9)));
}

#[test]
fn ties_keep_the_wider_bound() {
    let closed = Range::closed(at(1), at(5)).unwrap();
    let open = Range::new(RangeBound::Exclusive(at(1)), RangeBound::Exclusive(at(5))).unwrap();

    assert_eq!(open.merge(&closed), closed);
    assert_eq!(closed.merge(&open), closed);
}

#[test]
fn discrete_ranges_covering_nothing_do_not_widen() {
    let hollow = Range::new(RangeBound::Exclusive(1_i64), RangeBound::Exclusive(2)).unwrap();
    let range = Range::closed_open(5_i64, 6).unwrap();

    assert_eq!(range_merge_all([hollow, range.clone()]), Some(range));
}

#[test]
fn unbounded_ends_absorb_everything() {
    let left = Range::new(RangeBound::Unbounded, RangeBound::Exclusive(0_i64)).unwrap();
    let right = Range::closed_open(10_i64, 20).unwrap();
    let merged = left.merge(&right);

    assert!(merged.lower_inf());
    assert_eq!(merged.upper(), Some(&20));
}

#[test]
fn state_skips_absent_inputs_and_counts_rows() {
    let mut state = RangeMergeState::new();
    state.push_opt(None);
    state.push_opt(Some(slot(9, 10)));
    state.push_opt(None);
    state.push(slot(8, 9));

    assert_eq!(state.rows(), 2);
    assert_eq!(state.peek(), Some(&slot(8, 10)));
    assert_eq!(state.finish(), Some(slot(8, 10)));
}

#[test]
fn partial_states_combine() {
    let mut left: RangeMergeState<_> = [slot(8, 9), slot(10, 11)].into_iter().collect();
    let right: RangeMergeState<_> = [slot(13, 14)].into_iter().collect();
    left.merge_state(right);
    left.merge_state(RangeMergeState::new());

    assert_eq!(left.rows(), 3);
    assert_eq!(left.finish(), Some(slot(8, 14)));
}

fn arb_bound() -> impl Strategy<Value = RangeBound<i64>> {
    prop_oneof![
        (-50_i64..50).prop_map(RangeBound::Inclusive),
        (-50_i64..50).prop_map(RangeBound::Exclusive),
        Just(RangeBound::Unbounded),
    ]
}

fn arb_range() -> impl Strategy<Value = Range<i64>> {
    (arb_bound(), arb_bound()).prop_map(|(a, b)| {
        Range::new(a.clone(), b.clone())
            .or_else(|_| Range::new(b, a))
            .unwrap_or_else(|_| Range::empty())
    })
}

proptest! {
    #[test]
    fn merge_is_commutative(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn merge_is_associative(a in arb_range(), b in arb_range(), c in arb_range()) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn merge_is_idempotent(a in arb_range()) {
        prop_assert_eq!(a.merge(&a), a);
    }

    #[test]
    fn fold_order_does_not_matter(ranges in prop::collection::vec(arb_range(), 0..8)) {
        let forward = range_merge_all(ranges.clone());
        let backward = range_merge_all(ranges.into_iter().rev());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn envelope_tracks_extrema(ranges in prop::collection::vec(arb_range(), 1..8)) {
        let merged = range_merge_all(ranges.clone()).unwrap();
        let non_empty = ranges.iter().filter(|r| !r.is_empty()).collect::<Vec<_>>();

        if non_empty.is_empty() {
            prop_assert!(merged.is_empty());
        } else {
            let want_lower_inf = non_empty.iter().any(|r| r.lower_inf());
            let want_upper_inf = non_empty.iter().any(|r| r.upper_inf());
            prop_assert_eq!(merged.lower_inf(), want_lower_inf);
            prop_assert_eq!(merged.upper_inf(), want_upper_inf);

            if !want_lower_inf {
                let min = non_empty.iter().filter_map(|r| r.lower()).min();
                prop_assert_eq!(merged.lower(), min);
            }
            if !want_upper_inf {
                let max = non_empty.iter().filter_map(|r| r.upper()).max();
                prop_assert_eq!(merged.upper(), max);
            }
        }
    }
}
