use super::{
    query::{AggregateExpr, AggregateQuery},
    *,
};
use crate::{
    error::ErrorClass,
    model::TimeSlot,
    schema::{AggregateDefinition, QualifiedName},
    types::{Range, RangeType},
    value::{RangeValue, Value},
};
use chrono::{DateTime, TimeZone, Utc};

const INSTALL_SQL: &str =
    "CREATE OR REPLACE AGGREGATE range_merge(anyrange)(sfunc=range_merge, stype=anyrange);";
const REMOVE_SQL: &str = "DROP AGGREGATE IF EXISTS range_merge(anyrange);";

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

fn slot(from: u32, to: u32) -> Range<DateTime<Utc>> {
    Range::closed_open(at(from), at(to)).unwrap()
}

fn installed_db() -> MemoryDb {
    let mut db = MemoryDb::new();
    db.execute_sql(INSTALL_SQL).unwrap();
    db.create_table::<TimeSlot>().unwrap();
    db
}

fn merged_query() -> AggregateQuery {
    AggregateQuery::for_entity::<TimeSlot>().aggregate("merged", TimeSlot::TIME_RANGE.range_merge())
}

///
/// Booking
/// Entity with nullable columns, for NULL handling.
///

struct Booking {
    id: i64,
    room: Option<&'static str>,
    span: Option<Range<i64>>,
}

impl EntityKind for Booking {
    const TABLE: &'static str = "booking";
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("id", ColumnType::Int),
        ColumnDef::new("room", ColumnType::Text),
        ColumnDef::new("span", ColumnType::Range(RangeType::Int8Range)),
    ];

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Int(self.id)),
            "room" => Some(self.room.into()),
            "span" => Some(self.span.clone().into()),
            _ => None,
        }
    }
}

fn booking(id: i64, room: Option<&'static str>, span: Option<(i64, i64)>) -> Booking {
    Booking {
        id,
        room,
        span: span.map(|(lo, hi)| Range::closed_open(lo, hi).unwrap()),
    }
}

//
// Catalog
//

#[test]
fn install_is_idempotent() {
    let mut db = MemoryDb::new();

    assert_eq!(db.execute_sql(INSTALL_SQL).unwrap(), DdlOutcome::Created);
    assert_eq!(db.execute_sql(INSTALL_SQL).unwrap(), DdlOutcome::Replaced);
    assert_eq!(db.catalog().len(), 1);

    db.create_table::<TimeSlot>().unwrap();
    for (id, (from, to)) in [(1, (8, 12)), (2, (11, 15)), (3, (14, 18))] {
        db.insert(&TimeSlot::new(id, "shift", slot(from, to))).unwrap();
    }
    let response = db.aggregate(&merged_query()).unwrap();

    assert_eq!(
        response.scalar("merged").unwrap(),
        Some(RangeValue::Tstz(slot(8, 18)))
    );
}

#[test]
fn remove_is_idempotent() {
    let mut db = installed_db();

    assert_eq!(db.execute_sql(REMOVE_SQL).unwrap(), DdlOutcome::Dropped);
    assert_eq!(db.execute_sql(REMOVE_SQL).unwrap(), DdlOutcome::Skipped);
    assert!(db.catalog().is_empty());
}

#[test]
fn create_without_replace_conflicts_on_existing() {
    let mut db = installed_db();

    let err = db
        .execute_sql("CREATE AGGREGATE range_merge(anyrange)(sfunc=range_merge, stype=anyrange)")
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::Conflict);
}

#[test]
fn replace_cannot_change_state_type() {
    let mut catalog = Catalog::new();
    let definition = AggregateDefinition::range_merge(RangeType::AnyRange);
    catalog.create_aggregate(&definition, false).unwrap();

    let mut changed = definition;
    changed.stype = RangeType::Int8Range;
    let err = catalog.create_aggregate(&changed, true).unwrap_err();

    assert!(err.is_conflict());
    assert!(err.message.contains("cannot change return type"));
}

#[test]
fn unknown_step_function_is_rejected() {
    let mut db = MemoryDb::new();

    let err = db
        .execute_sql("CREATE AGGREGATE range_merge(anyrange)(sfunc=range_union, stype=anyrange)")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn drop_without_if_exists_fails_when_absent() {
    let mut db = MemoryDb::new();

    let err = db
        .execute_sql("DROP AGGREGATE range_merge(anyrange)")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn resolve_prefers_exact_signature_over_polymorphic() {
    let mut catalog = Catalog::new();
    catalog
        .create_aggregate(&AggregateDefinition::range_merge(RangeType::AnyRange), false)
        .unwrap();
    catalog
        .create_aggregate(&AggregateDefinition::range_merge(RangeType::DateRange), false)
        .unwrap();

    let name = QualifiedName::new("range_merge");
    let exact = catalog.resolve(&name, RangeType::DateRange).unwrap();
    let poly = catalog.resolve(&name, RangeType::Int8Range).unwrap();

    assert_eq!(exact.definition.arg_type, RangeType::DateRange);
    assert_eq!(poly.definition.arg_type, RangeType::AnyRange);
    assert_eq!(poly.step, BuiltinFunction::RangeMerge);
}

#[test]
fn renamed_aggregate_is_called_by_its_own_name() {
    let definition = AggregateDefinition::range_merge(RangeType::AnyRange)
        .with_schema("reporting")
        .with_name("envelope");
    let mut db = MemoryDb::new();
    db.execute_ddl(&definition.install()).unwrap();
    db.create_table::<TimeSlot>().unwrap();
    db.insert(&TimeSlot::new(1, "a", slot(8, 10))).unwrap();
    db.insert(&TimeSlot::new(2, "b", slot(14, 16))).unwrap();

    let query = AggregateQuery::for_entity::<TimeSlot>()
        .aggregate("merged", TimeSlot::TIME_RANGE.aggregate(&definition));
    assert_eq!(
        query.to_sql(),
        r#"SELECT reporting.envelope("time_range") AS "merged" FROM "time_slot""#
    );
    assert_eq!(
        db.aggregate(&query).unwrap().scalar("merged").unwrap(),
        Some(RangeValue::Tstz(slot(8, 16)))
    );

    let err = db.aggregate(&merged_query()).unwrap_err();
    assert!(err.to_string().contains("function range_merge(tstzrange) does not exist"));

    let elsewhere = QualifiedName::new("envelope").with_schema("public");
    assert!(db.catalog().resolve(&elsewhere, RangeType::TstzRange).is_err());
}

//
// Store
//

#[test]
fn insert_rejects_duplicate_primary_key() {
    let mut db = installed_db();
    db.insert(&TimeSlot::new(1, "a", slot(8, 12))).unwrap();

    let err = db.insert(&TimeSlot::new(1, "b", slot(9, 10))).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(db.table("time_slot").map(Table::len), Some(1));
}

#[test]
fn insert_into_missing_table_fails() {
    let mut db = MemoryDb::new();

    let err = db.insert(&TimeSlot::new(1, "a", slot(8, 12))).unwrap_err();
    assert!(err.is_not_found());
}

//
// Aggregate execution
//

#[test]
fn aggregate_merges_all_rows() {
    let mut db = installed_db();
    for (id, (from, to)) in [(8, 12), (11, 15), (14, 18)].into_iter().enumerate() {
        db.insert(&TimeSlot::new(i64::try_from(id).unwrap(), "shift", slot(from, to)))
            .unwrap();
    }

    let response = db.aggregate(&merged_query()).unwrap();

    assert_eq!(
        response.scalar("merged").unwrap(),
        Some(RangeValue::Tstz(slot(8, 18)))
    );
}

#[test]
fn aggregate_over_no_rows_yields_null() {
    let mut db = installed_db();
    db.insert(&TimeSlot::new(1, "a", slot(8, 12))).unwrap();

    let response = db.aggregate(&merged_query().none()).unwrap();

    assert_eq!(response.len(), 1);
    assert_eq!(response.scalar("merged").unwrap(), None);
}

#[test]
fn aggregate_respects_filter() {
    let mut db = installed_db();
    db.insert(&TimeSlot::new(1, "a", slot(8, 10))).unwrap();
    db.insert(&TimeSlot::new(2, "b", slot(12, 14))).unwrap();
    db.insert(&TimeSlot::new(3, "c", slot(20, 22))).unwrap();

    let query = merged_query().filter(TimeSlot::NAME.in_list(["a", "b"]));
    let merged = db.aggregate(&query).unwrap().scalar("merged").unwrap();

    assert_eq!(merged, Some(RangeValue::Tstz(slot(8, 14))));
}

#[test]
fn aggregate_before_install_reports_missing_function() {
    let mut db = MemoryDb::new();
    db.create_table::<TimeSlot>().unwrap();

    let err = db.aggregate(&merged_query()).unwrap_err();

    assert!(err.to_string().contains("function range_merge(tstzrange) does not exist"));
}

#[test]
fn aggregate_after_remove_reports_missing_function() {
    let mut db = installed_db();
    db.execute_sql(REMOVE_SQL).unwrap();

    assert!(db.aggregate(&merged_query()).is_err());
}

#[test]
fn grouped_aggregate_returns_one_row_per_group_in_key_order() {
    let mut db = installed_db();
    db.create_table::<Booking>().unwrap();
    db.insert(&booking(1, Some("north"), Some((5, 8)))).unwrap();
    db.insert(&booking(2, Some("east"), Some((1, 3)))).unwrap();
    db.insert(&booking(3, Some("north"), Some((1, 2)))).unwrap();
    db.insert(&booking(4, Some("east"), None)).unwrap();
    db.insert(&booking(5, None, Some((40, 41)))).unwrap();

    let query = AggregateQuery::for_entity::<Booking>()
        .group_by("room")
        .aggregate("span", AggregateExpr::range_merge("span"));
    let response = db.aggregate(&query).unwrap();

    let rows = response
        .rows()
        .iter()
        .map(|row| (row.group.clone(), row.get("span").cloned()))
        .collect::<Vec<_>>();
    let span = |lo, hi| Some(RangeValue::Int8(Range::closed_open(lo, hi).unwrap()));
    assert_eq!(
        rows,
        vec![
            (vec![Value::Null], span(40, 41)),
            (vec![Value::from("east")], span(1, 3)),
            (vec![Value::from("north")], span(1, 8)),
        ]
    );
    assert!(response.scalar("span").is_err());
}

#[test]
fn null_inputs_are_skipped_and_all_null_group_is_null() {
    let mut db = installed_db();
    db.create_table::<Booking>().unwrap();
    db.insert(&booking(1, Some("west"), None)).unwrap();
    db.insert(&booking(2, Some("west"), None)).unwrap();

    let query = AggregateQuery::for_entity::<Booking>()
        .aggregate("span", AggregateExpr::range_merge("span"));

    assert_eq!(db.aggregate(&query).unwrap().scalar("span").unwrap(), None);
}

#[test]
fn aggregate_over_non_range_column_is_rejected() {
    let db = installed_db();
    let query = AggregateQuery::for_entity::<TimeSlot>()
        .aggregate("merged", AggregateExpr::range_merge("name"));

    assert!(matches!(
        db.aggregate(&query),
        Err(query::QueryError::NotRangeColumn { .. })
    ));
}

#[test]
fn unknown_table_and_field_are_rejected() {
    let db = installed_db();

    assert!(matches!(
        db.aggregate(&AggregateQuery::new("missing").aggregate("m", AggregateExpr::range_merge("x"))),
        Err(query::QueryError::UnknownTable(_))
    ));
    assert!(matches!(
        db.aggregate(&merged_query().filter(query::FieldRef::new("nope").eq(1_i64))),
        Err(query::QueryError::UnknownField { .. })
    ));
}
