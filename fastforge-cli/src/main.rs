//! fastforge CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod observability;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{CreateCommand, GenerateCommand, MigrationCommand};

#[derive(Parser)]
#[command(name = "fastforge")]
#[command(version)]
#[command(about = "Scaffold FastAPI projects and components", long_about = None)]
struct Cli {
    /// Configuration file (defaults to fastforge.toml in the output directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new FastAPI project
    Create {
        /// Project name
        name: String,
        /// Directory to create the project in
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Project template: basic, standard or enterprise
        #[arg(short, long, default_value = "standard")]
        template: String,
    },
    /// Generate a component inside an existing project
    ///
    /// Examples:
    ///   fastforge generate model post
    ///   fastforge generate api post -o ./blog
    ///   fastforge generate service "order item"
    Generate {
        /// Component kind: model, api, service or migration
        kind: String,
        /// Component name
        name: String,
        /// Project directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Add the Alembic migration scaffold to a project
    InitMigration {
        /// Project directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose, cli.log_json)?;

    match cli.command {
        Commands::Create {
            name,
            output,
            template,
        } => {
            let cmd = CreateCommand::new(name, output, template, cli.config)?;
            cmd.execute()?;
        }
        Commands::Generate { kind, name, output } => {
            let cmd = GenerateCommand::new(kind, name, output, cli.config)?;
            cmd.execute()?;
        }
        Commands::InitMigration { output } => {
            let cmd = MigrationCommand::new(output, cli.config)?;
            cmd.execute()?;
        }
    }

    Ok(())
}
