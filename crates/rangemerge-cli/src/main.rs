//! rangemerge - render, apply and track the `range_merge` aggregate migrations.
//!
//! Statements are never sent to a server from here: `migrate` writes the SQL
//! it would run and records the outcome in the ledger named by the config.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rangemerge::{config::CONFIG_FILE, core::types::RangeType};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// rangemerge - the range_merge aggregate and its migrations
#[derive(Parser, Debug)]
#[command(name = "rangemerge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the statement that installs the aggregate
    Sql {
        /// Print the statement that removes it instead
        #[arg(long)]
        backward: bool,
    },

    /// List migrations and whether the ledger has them applied
    Show {
        /// Emit JSON instead of a checklist
        #[arg(long)]
        json: bool,
    },

    /// Write the SQL needed to reach a target and record it in the ledger
    Migrate {
        /// Migration name (or `app.name`), or `zero` to unapply everything
        #[arg(long)]
        target: Option<String>,

        /// Record the migrations without emitting their statements
        #[arg(long)]
        fake: bool,

        /// Write the script to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge range literals the way the aggregate would
    Merge {
        /// Range type of every literal
        #[arg(long = "type", default_value = "int8range")]
        range_type: RangeType,

        /// Range literals, e.g. '[1,5)'
        #[arg(required = true)]
        ranges: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = commands::load_config(&cli.config)?;

    let output = match cli.command {
        Commands::Sql { backward } => commands::sql(&config, backward),
        Commands::Show { json } => commands::show(&config, json)?,
        Commands::Migrate {
            target,
            fake,
            output,
        } => {
            let script = commands::migrate(&config, target.as_deref(), fake)?;
            match output {
                Some(path) => {
                    commands::write_file(&path, &script)?;
                    String::new()
                }
                None => script,
            }
        }
        Commands::Merge { range_type, ranges } => commands::merge(range_type, &ranges)?,
    };

    if !output.is_empty() {
        print!("{output}");
    }

    Ok(())
}
