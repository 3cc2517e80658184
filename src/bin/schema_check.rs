//! Schema Check CLI
//!
//! Runs equivalence fixtures, lowers descriptors and shows resolved catalogs.

use std::path::PathBuf;

use anyhow::{bail, Context};
use blueprint_schemas::catalog::{self, ServiceGroup};
use blueprint_schemas::typebox::lower;
use blueprint_schemas::{load_fixtures, BlueprintConfig, FieldType, SchemaOptions, ValidatorContext};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-check")]
#[command(about = "Check that dual-authored schemas stay equivalent")]
struct Cli {
    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run equivalence fixtures
    Check {
        /// Fixture file or directory (defaults to the configured path)
        path: Option<PathBuf>,
        /// Stop at the first mismatch
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print the TypeBox JSON Schema for a descriptor file
    Lower {
        /// Descriptor JSON file
        file: PathBuf,
    },

    /// Resolve the service catalog for a validator family
    Resolve {
        /// Validator family tag (defaults to the configured family)
        #[arg(short, long)]
        validator: Option<String>,
        /// Use uuid primary keys
        #[arg(long)]
        uuid_id: bool,
    },

    /// Show the effective config, or write it to a file
    Config {
        /// Write the config to this path instead of printing it
        #[arg(long)]
        init: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a check ran but found mismatches
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = BlueprintConfig::load_from(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Check { path, fail_fast } => {
            let path = path.unwrap_or_else(|| config.equivalence.fixtures.clone());
            let fail_fast = fail_fast || config.equivalence.fail_fast;
            let fixtures = load_fixtures(&path)?;
            if fixtures.is_empty() {
                bail!("no fixtures found under {}", path.display());
            }

            println!("🔍 Checking {} fixture(s) from {}", fixtures.len(), path.display());
            let mut mismatches = 0;
            'fixtures: for fixture in &fixtures {
                for verdict in fixture.run()? {
                    if verdict.is_equivalent() {
                        println!("  ✅ {} / {}", verdict.fixture, verdict.case);
                    } else {
                        mismatches += 1;
                        println!("  ❌ {} / {}", verdict.fixture, verdict.case);
                        println!("     zod:     {}", verdict.report.left);
                        println!("     typebox: {}", verdict.report.right);
                        if fail_fast {
                            break 'fixtures;
                        }
                    }
                }
            }

            println!();
            if mismatches > 0 {
                println!("❌ {} case(s) disagree", mismatches);
                Ok(false)
            } else {
                println!("✅ All cases agree");
                Ok(true)
            }
        }

        Commands::Lower { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let descriptor: FieldType = serde_json::from_str(&content)
                .with_context(|| format!("parsing descriptor {}", file.display()))?;
            let lowered = lower(&descriptor);
            // make sure what we print actually compiles
            lowered.compile()?;
            println!("{}", serde_json::to_string_pretty(lowered.json())?);
            Ok(true)
        }

        Commands::Resolve { validator, uuid_id } => {
            let mut options: SchemaOptions = config.schemas.options();
            options.uuid_id |= uuid_id;
            let ctx = match validator {
                Some(tag) => ValidatorContext::from_tag(&tag, options)?,
                None => ValidatorContext::from_tag(&config.validator.family, options)?,
            };

            let schemas = catalog::service_schemas(&ctx)?;
            println!("📦 {} schema group(s) resolved for {}", schemas.len(), ctx.family);
            for (group_name, group) in schemas.iter() {
                println!();
                println!("{}", group_name);
                print_group(group);
            }
            Ok(true)
        }

        Commands::Config { init } => {
            match init {
                Some(path) => {
                    config.save(&path)?;
                    println!("✅ Config written to {}", path);
                }
                None => println!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(true)
        }
    }
}

fn print_group(group: &ServiceGroup) {
    for name in group.names() {
        match group.schema(name) {
            Some(schema) => match (schema.zod(), schema.typebox()) {
                (Some(zod), _) => println!("  {} = {}", name, zod),
                (_, Some(typebox)) => println!("  {} = {}", name, typebox.json()),
                (None, None) => {}
            },
            None => println!("  {} = <missing>", name),
        }
    }
}
