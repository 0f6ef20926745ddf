//! Migration scaffold command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use fastforge::{GeneratorConfig, Scaffolder};

use super::{load_config, output_dir, print_report, SUCCESS};

/// Add Alembic migration support to an existing project
pub struct MigrationCommand {
    output_dir: PathBuf,
    config: GeneratorConfig,
}

impl MigrationCommand {
    /// Create a new command instance
    pub fn new(output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let output_dir = output_dir(output)?;
        let config = load_config(config_path.as_deref(), &output_dir)?;
        Ok(Self { output_dir, config })
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        println!(
            "{} {}",
            style("Initialising").green().bold(),
            style("database migrations").bold()
        );
        println!();

        let report = Scaffolder::new(self.config)
            .generate_migration_scaffold(&self.output_dir)
            .context("Failed to write migration scaffold")?;

        print_report(&report, &self.output_dir);
        println!();
        println!(
            "{}",
            style(format!("{SUCCESS}Migration scaffold ready")).green().bold()
        );
        println!();
        println!("{}", style("Next steps:").bold());
        println!(
            "  {} alembic revision --autogenerate -m \"initial\"",
            style("$").dim()
        );
        println!("  {} alembic upgrade head", style("$").dim());

        Ok(())
    }
}
