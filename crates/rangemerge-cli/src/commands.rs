//! Command bodies. Each returns the text to print so it can be exercised
//! without a terminal.

use std::{fmt::Write as _, fs, io, path::Path};

use anyhow::{Context, Result};
use rangemerge::{
    config::Config,
    core::{
        migration::{
            MigrationId, MigrationLedger, MigrationRunner, MigrationTarget, ScriptExecutor,
            builtin,
        },
        types::RangeType,
    },
    merge_literals, migrations,
};
use tracing::info;

pub fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Read the ledger at `path`; a missing file is an empty ledger.
pub fn load_ledger(path: &Path) -> Result<MigrationLedger> {
    match fs::read_to_string(path) {
        Ok(json) => MigrationLedger::from_json(&json)
            .with_context(|| format!("failed to parse ledger {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(MigrationLedger::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read ledger {}", path.display())),
    }
}

pub fn save_ledger(path: &Path, ledger: &MigrationLedger) -> Result<()> {
    let json = ledger.to_json()?;

    write_file(path, &json)
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// The install statement, or the remove statement when `backward`.
pub fn sql(config: &Config, backward: bool) -> String {
    let definition = config.aggregate.definition();
    let statement = if backward {
        definition.remove()
    } else {
        definition.install()
    };

    format!("{}\n", statement.to_sql())
}

/// One line per migration in dependency order, marked `[X]` when applied.
pub fn show(config: &Config, json: bool) -> Result<String> {
    let set = migrations(config)?;
    let ledger = load_ledger(&config.ledger.path)?;
    let ordered = set.ordered()?;

    if json {
        let entries = ordered
            .iter()
            .map(|migration| {
                let applied = ledger.get(&migration.id);
                serde_json::json!({
                    "id": migration.id.to_string(),
                    "applied": applied.is_some(),
                    "applied_at": applied.map(|entry| entry.applied_at.to_rfc3339()),
                    "fake": applied.is_some_and(|entry| entry.fake),
                })
            })
            .collect::<Vec<_>>();

        return Ok(format!("{}\n", serde_json::to_string_pretty(&entries)?));
    }

    let mut out = String::new();
    for migration in ordered {
        let mark = match ledger.get(&migration.id) {
            Some(entry) if entry.fake => "[F]",
            Some(_) => "[X]",
            None => "[ ]",
        };
        writeln!(out, "{mark} {}", migration.id)?;
    }

    Ok(out)
}

/// Resolve a `--target` argument: absent means latest, `zero` unapplies the
/// bundled app, a bare name refers to a migration of the bundled app.
pub fn parse_target(target: Option<&str>) -> Result<MigrationTarget> {
    let Some(target) = target else {
        return Ok(MigrationTarget::Latest);
    };

    if target == "zero" {
        return Ok(MigrationTarget::Zero {
            app: builtin::APP.to_string(),
        });
    }

    let id = if target.contains('.') {
        target.parse::<MigrationId>()?
    } else {
        MigrationId::new(builtin::APP, target)
    };

    Ok(MigrationTarget::Migration(id))
}

/// Run the plan for `target` into a SQL script, save the ledger, and return
/// the script.
pub fn migrate(config: &Config, target: Option<&str>, fake: bool) -> Result<String> {
    let set = migrations(config)?;
    let target = parse_target(target)?;
    let mut ledger = load_ledger(&config.ledger.path)?;
    let mut script = ScriptExecutor::new();

    let report = MigrationRunner::new(&set, &mut script)
        .fake(fake)
        .migrate(&mut ledger, &target)?;

    if !report.is_noop() {
        save_ledger(&config.ledger.path, &ledger)?;
    }
    info!(
        applied = report.applied.len(),
        reverted = report.reverted.len(),
        fake,
        "ledger {} updated",
        config.ledger.path.display()
    );

    Ok(script.to_sql())
}

/// Merged range of `ranges`, printed the way a query result would be.
pub fn merge(range_type: RangeType, ranges: &[String]) -> Result<String> {
    let merged = merge_literals(range_type, ranges)?;

    Ok(match merged {
        Some(range) => format!("{range}\n"),
        None => "NULL\n".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const INSTALL_SQL: &str =
        "CREATE OR REPLACE AGGREGATE range_merge(anyrange)(sfunc=range_merge, stype=anyrange);";
    const REMOVE_SQL: &str = "DROP AGGREGATE IF EXISTS range_merge(anyrange);";

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.ledger.path = dir.join("state").join("ledger.json");
        config
    }

    #[test]
    fn sql_prints_both_directions() {
        let config = Config::default();

        assert_eq!(sql(&config, false), format!("{INSTALL_SQL}\n"));
        assert_eq!(sql(&config, true), format!("{REMOVE_SQL}\n"));
    }

    #[test]
    fn migrate_writes_ledger_and_rerun_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let script = migrate(&config, None, false).unwrap();
        assert_eq!(
            script,
            format!("-- Apply range_merge.0001_initial\n{INSTALL_SQL}\n")
        );
        assert!(config.ledger.path.exists());
        assert_eq!(show(&config, false).unwrap(), "[X] range_merge.0001_initial\n");

        assert_eq!(migrate(&config, None, false).unwrap(), "");
    }

    #[test]
    fn migrate_to_zero_emits_remove_and_clears_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        migrate(&config, None, false).unwrap();

        let script = migrate(&config, Some("zero"), false).unwrap();

        assert_eq!(
            script,
            format!("-- Unapply range_merge.0001_initial\n{REMOVE_SQL}\n")
        );
        assert!(load_ledger(&config.ledger.path).unwrap().is_empty());
        assert_eq!(show(&config, false).unwrap(), "[ ] range_merge.0001_initial\n");
    }

    #[test]
    fn fake_migrate_records_without_statements() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let script = migrate(&config, Some("0001_initial"), true).unwrap();

        assert!(!script.contains(INSTALL_SQL));
        assert_eq!(show(&config, false).unwrap(), "[F] range_merge.0001_initial\n");

        let json: serde_json::Value = serde_json::from_str(&show(&config, true).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "range_merge.0001_initial");
        assert_eq!(json[0]["fake"], true);
    }

    #[test]
    fn missing_ledger_is_empty_and_corrupt_ledger_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        assert!(load_ledger(&path).unwrap().is_empty());

        fs::write(&path, "{not json").unwrap();
        assert!(load_ledger(&path).is_err());
    }

    #[test]
    fn targets_parse() {
        assert!(matches!(parse_target(None).unwrap(), MigrationTarget::Latest));
        assert!(matches!(
            parse_target(Some("zero")).unwrap(),
            MigrationTarget::Zero { app } if app == builtin::APP
        ));
        assert!(matches!(
            parse_target(Some("0001_initial")).unwrap(),
            MigrationTarget::Migration(id) if id == builtin::initial_id()
        ));
        assert!(parse_target(Some("range_merge.")).is_err());
    }

    #[test]
    fn unknown_target_fails_without_touching_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        assert!(migrate(&config, Some("0009_missing"), false).is_err());
        assert!(!config.ledger.path.exists());
    }

    #[test]
    fn merge_prints_envelope_or_null() {
        let ranges = ["[5,9)".to_string(), "[1,3)".to_string()];

        assert_eq!(merge(RangeType::Int8Range, &ranges).unwrap(), "[1,9)\n");
        assert_eq!(merge(RangeType::Int8Range, &[]).unwrap(), "NULL\n");
        assert!(merge(RangeType::Int8Range, &["[9,1)".to_string()]).is_err());
    }

    #[test]
    fn write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("a").join("b").join("out.sql");

        write_file(&path, "SELECT 1;\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "SELECT 1;\n");
    }
}
