use super::*;
use crate::{error::ErrorClass, types::RangeType};

const INSTALL_SQL: &str =
    "CREATE OR REPLACE AGGREGATE range_merge(anyrange)(sfunc=range_merge, stype=anyrange);";
const REMOVE_SQL: &str = "DROP AGGREGATE IF EXISTS range_merge(anyrange);";

#[test]
fn install_and_remove_render_exact_sql() {
    let definition = AggregateDefinition::range_merge(RangeType::AnyRange);

    assert_eq!(definition.install().to_sql(), INSTALL_SQL);
    assert_eq!(definition.remove().to_sql(), REMOVE_SQL);
}

#[test]
fn schema_qualified_definition_renders_qualified_name() {
    let definition = AggregateDefinition::range_merge(RangeType::TstzRange).with_schema("reporting");

    assert_eq!(
        definition.install().to_sql(),
        "CREATE OR REPLACE AGGREGATE reporting.range_merge(tstzrange)(sfunc=range_merge, stype=tstzrange);"
    );
    assert_eq!(
        definition.remove().to_sql(),
        "DROP AGGREGATE IF EXISTS reporting.range_merge(tstzrange);"
    );
}

#[test]
fn rendered_statements_parse_back() {
    let definition = AggregateDefinition::range_merge(RangeType::AnyRange).with_schema("public");

    for statement in [definition.install(), definition.remove()] {
        assert_eq!(Statement::parse(&statement.to_sql()).unwrap(), statement);
    }
}

#[test]
fn parser_is_case_and_whitespace_insensitive() {
    let parsed: Statement = "create aggregate RANGE_MERGE ( AnyRange ) ( STYPE = anyrange , SFUNC = range_merge )"
        .parse()
        .unwrap();

    assert_eq!(
        parsed,
        Statement::CreateAggregate {
            or_replace: false,
            definition: AggregateDefinition::range_merge(RangeType::AnyRange),
        }
    );

    let parsed = Statement::parse("drop aggregate range_merge(int8range)").unwrap();
    assert_eq!(
        parsed,
        Statement::DropAggregate {
            if_exists: false,
            signature: AggregateDefinition::range_merge(RangeType::Int8Range).signature(),
        }
    );
}

#[test]
fn parser_rejects_other_statements_and_bad_shapes() {
    let cases = [
        "SELECT 1",
        "CREATE OR REPLACE AGGREGATE range_merge(anyrange)(sfunc=range_merge);",
        "CREATE AGGREGATE range_merge(numrange)(sfunc=range_merge, stype=numrange)",
        "CREATE AGGREGATE range_merge(anyrange)(sfunc=range_merge, stype=anyrange, initcond=x)",
        "DROP AGGREGATE IF EXISTS range_merge(anyrange); DROP AGGREGATE range_merge(anyrange)",
        "DROP AGGREGATE IF range_merge(anyrange)",
        "DROP AGGREGATE \"Range\"(anyrange)",
        "",
    ];

    for sql in cases {
        let err = Statement::parse(sql).unwrap_err();
        assert!(
            matches!(err.class, ErrorClass::Unsupported | ErrorClass::Validation),
            "{sql:?} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn identifiers_are_validated() {
    assert!(validate_identifier("range_merge").is_ok());
    assert!(validate_identifier("_private2").is_ok());
    assert!(validate_identifier("").is_err());
    assert!(validate_identifier("2fast").is_err());
    assert!(validate_identifier("Range").is_err());
    assert!(validate_identifier("drop;table").is_err());
    assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
}

#[test]
fn definition_rejects_incompatible_state_type() {
    let mut definition = AggregateDefinition::range_merge(RangeType::Int8Range);
    definition.stype = RangeType::DateRange;

    assert!(definition.validate().is_err());
    assert!(
        AggregateDefinition::range_merge(RangeType::AnyRange)
            .validate()
            .is_ok()
    );
}
