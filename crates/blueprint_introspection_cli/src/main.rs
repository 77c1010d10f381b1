// SPDX-License-Identifier: MIT OR Apache-2.0
//! `bpintrospect` - blueprint introspection from the command line
//!
//! Loads unit snapshots into a registry, runs one introspection command and
//! prints the JSON response on stdout. Logs go to stderr.

use anyhow::Context;
use blueprint_introspection::config::CONFIG_FILE_NAME;
use blueprint_introspection::{BlueprintIntrospector, CommandHandler, IntrospectionConfig, GET_BLUEPRINT_DATA};
use blueprint_model::{UnitRegistry, UnitSource};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Blueprint introspection CLI
#[derive(Parser)]
#[command(name = "bpintrospect")]
#[command(about = "Describe blueprint snapshots as JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BPINTROSPECT_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file or directory of `.json` snapshots (repeatable)
    #[arg(short, long = "units", value_name = "DIR|FILE")]
    units: Vec<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Print the document for one unit
    Get {
        /// Unit name, object path or package path
        blueprint_name: String,
    },

    /// List registered unit names
    List,

    /// Run a raw command with JSON parameters
    Exec {
        /// Command name, e.g. `get_blueprint_data`
        command_type: String,
        /// Parameter object as JSON
        params: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blueprint_introspection=info,blueprint_model=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut config = IntrospectionConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    if cli.compact {
        config.pretty_output = false;
    }

    let mut registry = UnitRegistry::new();
    for path in &cli.units {
        registry
            .load_path(path)
            .with_context(|| format!("failed to load units from {}", path.display()))?;
    }
    tracing::debug!("Registry holds {} units", registry.len());

    let pretty = config.pretty_output;
    let handler = CommandHandler::new(&registry, BlueprintIntrospector::new(config));

    let response = match cli.command {
        Commands::Get { blueprint_name } => {
            handler.handle(GET_BLUEPRINT_DATA, &json!({ "blueprint_name": blueprint_name }))
        }
        Commands::List => json!({
            "success": true,
            "units": registry.unit_names(),
        }),
        Commands::Exec { command_type, params } => {
            let params: Value = serde_json::from_str(&params).context("params must be valid JSON")?;
            handler.handle(&command_type, &params)
        }
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{rendered}");

    if response["success"] == true {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
