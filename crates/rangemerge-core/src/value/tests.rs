use super::*;
use crate::types::{RangeError, RangeType};

fn int8(lo: i64, hi: i64) -> RangeValue {
    Range::closed_open(lo, hi).unwrap().into()
}

#[test]
fn range_value_merges_same_concrete_type() {
    let merged = int8(1, 3).merge(&int8(7, 9)).unwrap();

    assert_eq!(merged, int8(1, 9));
    assert_eq!(merged.range_type(), RangeType::Int8Range);
}

#[test]
fn typed_accessors_match_only_their_variant() {
    let date = RangeValue::parse(RangeType::DateRange, "[2024-01-01,2024-01-05]").unwrap();

    assert_eq!(int8(1, 3).as_int8(), Some(&Range::closed_open(1, 3).unwrap()));
    assert_eq!(int8(1, 3).as_date(), None);
    assert_eq!(date.as_int8(), None);
    assert_eq!(
        date.as_date().map(ToString::to_string).as_deref(),
        Some("[2024-01-01,2024-01-06)")
    );
    assert!(date.as_tstz().is_none());
}

#[test]
fn range_value_rejects_mixed_types() {
    let date = RangeValue::parse(RangeType::DateRange, "[2024-01-01,2024-01-05)").unwrap();
    let err = int8(1, 3).merge(&date).unwrap_err();

    assert_eq!(
        err,
        RangeError::TypeMismatch {
            left: RangeType::Int8Range,
            right: RangeType::DateRange,
        }
    );
}

#[test]
fn range_value_parse_requires_concrete_type() {
    assert!(RangeValue::parse(RangeType::AnyRange, "[1,2)").is_err());
    assert_eq!(
        RangeValue::parse(RangeType::Int8Range, "[1,2)").unwrap(),
        int8(1, 2)
    );
}

#[test]
fn values_have_a_total_order_across_variants() {
    let mut values = vec![
        Value::from("b"),
        Value::Int(2),
        Value::Null,
        Value::from(int8(1, 2)),
        Value::from("a"),
        Value::Int(-1),
    ];
    values.sort();

    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Int(-1),
            Value::Int(2),
            Value::from("a"),
            Value::from("b"),
            Value::from(int8(1, 2)),
        ]
    );
}

#[test]
fn sql_literals_are_quoted_and_typed() {
    assert_eq!(Value::Null.to_sql_literal(), "NULL");
    assert_eq!(Value::Int(7).to_sql_literal(), "7");
    assert_eq!(Value::from("O'Hara").to_sql_literal(), "'O''Hara'");
    assert_eq!(
        Value::from(int8(1, 5)).to_sql_literal(),
        "'[1,5)'::int8range"
    );
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(4_i64)), Value::Int(4));
}
