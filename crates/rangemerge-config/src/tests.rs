use super::*;
use std::io::Write as _;

#[test]
fn empty_document_yields_defaults() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.aggregate.name, "range_merge");
    assert_eq!(config.aggregate.range_type, RangeType::AnyRange);
    assert_eq!(config.ledger.path, PathBuf::from(".rangemerge/ledger.json"));
}

#[test]
fn full_document_parses() {
    let config = Config::from_toml_str(
        r#"
        [aggregate]
        name = "span_merge"
        schema = "reporting"
        range_type = "tstzrange"

        [ledger]
        path = "state/ledger.json"
        "#,
    )
    .unwrap();

    assert_eq!(config.aggregate.range_type, RangeType::TstzRange);
    assert_eq!(
        config.aggregate.definition().install().to_sql(),
        "CREATE OR REPLACE AGGREGATE reporting.span_merge(tstzrange)(sfunc=range_merge, stype=tstzrange);"
    );
    assert_eq!(config.ledger.path, PathBuf::from("state/ledger.json"));
}

#[test]
fn default_definition_is_the_canonical_aggregate() {
    assert_eq!(
        Config::default().aggregate.definition(),
        AggregateDefinition::range_merge(RangeType::AnyRange)
    );
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        ("[aggregate]\nname = \"Range Merge\"", "invalid"),
        ("[aggregate]\nschema = \"1st\"", "invalid"),
        ("[aggregate]\nrange_type = \"numrange\"", "parse"),
        ("[aggregate]\ncolor = \"blue\"", "parse"),
        ("[ledger]\npath = \"\"", "invalid"),
    ];

    for (toml, expected) in cases {
        let err = Config::from_toml_str(toml).unwrap_err();
        let actual = match err {
            ConfigError::Invalid(_) => "invalid",
            ConfigError::Parse(_) => "parse",
            _ => "other",
        };
        assert_eq!(actual, expected, "{toml:?}: {err}");
    }
}

#[test]
fn load_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn load_reads_file_and_round_trips() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[aggregate]\nrange_type = \"daterange\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.aggregate.range_type, RangeType::DateRange);

    let rendered = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&rendered).unwrap(), config);
}
